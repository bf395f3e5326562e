//! Macros for generating visitor traits over tree types.

/// Creates a visitor trait plus one `walk_*` function per visited type.
///
/// Every `visit` entry generates a `walk_<snake_case type>` function containing the given
/// block and a trait method `visit_<snake_case type>` that defaults to calling it, so
/// implementors can override single methods and still recurse with the walk function.
///
/// ```
/// # use flint_visitor_gen::visit;
/// pub struct Pair(pub Leaf, pub Leaf);
/// pub struct Leaf(pub i32);
///
/// visit! {
///     pub trait Visitor {
///         pub visit(visitor, pair: &Pair) {
///             visitor.visit_leaf(&pair.0);
///             visitor.visit_leaf(&pair.1);
///         }
///         pub visit(_visitor, _leaf: &Leaf) {}
///     }
/// }
///
/// struct Sum(i32);
/// impl Visitor for Sum {
///     fn visit_leaf(&mut self, leaf: &Leaf) {
///         self.0 += leaf.0;
///     }
/// }
///
/// let mut sum = Sum(0);
/// sum.visit_pair(&Pair(Leaf(1), Leaf(2)));
/// assert_eq!(sum.0, 3);
/// ```
#[macro_export]
macro_rules! visit {
    (
        $trait_vis:vis trait $id:ident {
            $($vis:vis visit ($visitor_id:ident, $visited_id:ident: &$visited:ident) $block:block)+
        }
    ) => {
        $(
        $crate::__private::paste! {
            #[allow(unused_variables)]
            $vis fn [<walk_ $visited:snake>]<V: $id + ?Sized>($visitor_id: &mut V, $visited_id: &$visited) {
                $block
            }
        }
        )*

        $trait_vis trait $id {
            $(
            $crate::__private::paste! {
                fn [<visit_ $visited:snake>](&mut self, $visited_id: &$visited) {
                    [<walk_ $visited:snake>](self, $visited_id)
                }
            }
            )*
        }
    };
}

#[doc(hidden)]
pub mod __private {
    pub use paste::paste;
}
