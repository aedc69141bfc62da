pub mod collation_utils;
pub mod date_utils;
pub mod hash_utils;
pub mod str_utils;
pub mod value_utils;
