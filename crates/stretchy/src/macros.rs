//! Constructor macro.

/// Create a [`StretchyBuf`](crate::StretchyBuf) on the global allocator.
///
/// ```
/// use stretchy::stretchy;
///
/// let buf = stretchy![1.0f32, 2.0, 3.0];
/// assert_eq!(buf, [1.0, 2.0, 3.0]);
///
/// let zeros = stretchy![0u8; 4];
/// assert_eq!(zeros.len(), 4);
///
/// let empty: stretchy::StretchyBuf<u8> = stretchy![];
/// assert!(!empty.is_allocated());
/// ```
///
/// # Panics
///
/// Panics if the allocator cannot provide the block.
#[macro_export]
macro_rules! stretchy {
    () => {
        $crate::StretchyBuf::new()
    };
    ($elem:expr; $n:expr) => {{
        let mut buf = $crate::StretchyBuf::new();
        if let ::core::result::Result::Err(err) = buf.resize($n, $elem) {
            ::core::panic!("stretchy buffer growth failed: {}", err);
        }
        buf
    }};
    ($($x:expr),+ $(,)?) => {
        <$crate::StretchyBuf<_> as ::core::iter::FromIterator<_>>::from_iter([$($x),+])
    };
}
