/// Decide whether the acting identity may mutate a resource.
///
/// Only the recorded owner may.
pub fn authorize<T: PartialEq + ?Sized>(acting: &T, owner: &T) -> bool {
    acting == owner
}
