use crate::internal::Sealed;

macro_rules! markers {
    { $( $(#[$meta:meta])* $ident:ident, )* } => {$(
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $ident;
        impl Sealed for $ident {}
        impl Marker for $ident {}
    )*};
}

markers! {
    CommentMarker,
    PostMarker,
    UserMarker,
}

/// This trait represents a marker restricting which types can be
/// used as a generic in the [`Id`](super::Id) object.
pub trait Marker: Sealed {}
