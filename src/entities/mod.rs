pub mod media_type;
pub mod record;

pub use crate::entities::media_type::MediaType;
pub use crate::entities::record::Record;
