mod assignment;
mod instance;
mod item;

#[doc(inline)]
pub use assignment::Assignment;
#[doc(inline)]
pub use assignment::PackedBin;
#[doc(inline)]
pub use instance::PackingInstance;
#[doc(inline)]
pub use item::Item;
