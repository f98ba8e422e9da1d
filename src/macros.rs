/// Declares one accessor per dashboard signal, named after its field in
/// [`crate::global_state::Globals`]:
///
/// `global_signals! { pub candle_count: usize, pub logs: Vec<String> }`
#[macro_export]
macro_rules! global_signals {
    ( $( $vis:vis $field:ident : $ty:ty ),+ $(,)? ) => {
        $(
            #[doc = concat!("Dashboard signal `", stringify!($field), "`")]
            $vis fn $field() -> ::leptos::RwSignal<$ty> {
                $crate::global_state::globals().$field
            }
        )+
    };
}
