/// Item to be packed.
#[derive(Clone, Debug, PartialEq)]
pub struct Item {
    /// Position of the item in its [`PackingInstance`](crate::entities::PackingInstance)
    pub id: usize,
    /// Unique name within the instance
    pub name: String,
    /// Strictly positive weight
    pub weight: f64,
}

impl Item {
    pub fn new(id: usize, name: String, weight: f64) -> Item {
        debug_assert!(weight > 0.0 && weight.is_finite());
        Item { id, name, weight }
    }
}
