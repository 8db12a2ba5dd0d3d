pub mod mae;
pub mod mse;
pub mod loss_type;

pub use mae::MaeLoss;
pub use mse::MseLoss;
pub use loss_type::LossType;
