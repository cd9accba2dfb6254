/// A post in its canonical in-memory form.
///
/// An id of 0 or less means the remote source has not assigned the record
/// an identity yet; such posts cannot be looked up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
  pub id: i64,
  pub user_id: Option<i64>,
  pub title: String,
  pub body: String,
}
