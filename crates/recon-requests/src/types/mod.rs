mod addr;
mod asn;
mod dns;
mod whois;
mod zone;

pub use addr::*;
pub use asn::*;
pub use dns::*;
pub use whois::*;
pub use zone::*;
