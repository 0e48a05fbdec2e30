//! Centralized icon definitions.
//!
//! Maps semantic icon names to Lucide icons. Swap an alias here to restyle
//! every use site.

pub use icondata::{
    LuChevronLeft as BACK, LuExternalLink as EXTERNAL_LINK, LuGlobe as CHANNELS,
    LuHouse as STOREFRONT, LuImage as REFERENCES, LuLayoutGrid as DASHBOARD,
    LuList as FILTER, LuLock as ADMIN, LuLogIn as SIGN_IN, LuLogOut as SIGN_OUT,
    LuPencil as EDIT, LuPlus as PLUS, LuSearch as SEARCH, LuUser as SELLER, LuX as CLOSE,
};

use icondata::Icon;

use crate::models::NavLink;

/// Icon shown next to a navigation link.
pub fn nav_icon(link: NavLink) -> Icon {
    match link {
        NavLink::Storefront => STOREFRONT,
        NavLink::Sellers => SELLER,
        NavLink::Channels => CHANNELS,
        NavLink::References => REFERENCES,
    }
}
