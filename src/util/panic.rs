#[allow(unused_macros)]
macro_rules! assert_panics {
    ($run:block) => {
        assert_panics!($run, "expected the block to panic")
    };
    ($run:block, $msg:expr $(,)?) => {
        assert!(
            ::std::panic::catch_unwind(::std::panic::AssertUnwindSafe(|| $run)).is_err(),
            $msg
        )
    };
}

#[allow(unused_imports)]
pub(crate) use assert_panics;
