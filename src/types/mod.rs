mod clientconfig;
mod command;
mod entities;
mod instance;
mod login_flow;
mod response;
mod tile;

pub use clientconfig::*;
pub(crate) use command::*;
pub use entities::*;
pub use instance::*;
pub use login_flow::*;
pub use response::*;
pub use tile::*;
