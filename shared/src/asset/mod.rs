mod error;
mod set_asset;

pub use error::AssetError;
pub use set_asset::AttributeSetAsset;
