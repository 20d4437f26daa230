pub mod config_ops;
pub mod convert_ops;
pub mod fetch_ops;
pub mod fix_ops;
pub mod generate_ops;
pub mod pack_ops;
