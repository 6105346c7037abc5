/// Errors returned by [`crate::Gallery::attach`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GalleryError {
    #[error("the attached container must not be absent")]
    MissingContainer,
    #[error("the gallery is already attached to a container")]
    AlreadyAttached,
}
