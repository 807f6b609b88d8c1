pub mod convert;
pub mod districts;
