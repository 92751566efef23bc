/// Invoke `$m` for a list of type names and then for every shorter tail of that list.
#[macro_export]
#[doc(hidden)]
macro_rules! each_tuple_tail {
    ($m:ident !! $head:ident) => {
        $m!($head);
    };
    ($m:ident !! $head:ident, $($tail:ident),*) => (
        $m!($head, $( $tail ),*);
        $crate::each_tuple_tail!($m !! $( $tail ),*);
    );
}

/// Apply a macro to every tuple arity from 1 to 16, used to implement signature conversion for
/// tuples of component types.
#[macro_export]
#[doc(hidden)]
macro_rules! all_tuples {
    ($m:ident) => {
        $crate::each_tuple_tail!($m !! A, B, C, D, E, F, G, H, I, J, K, L, M, N, O, P);
    };
}
