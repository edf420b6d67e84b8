//! Macros for ergonomic table construction.

/// Build a [`TransitionTable`](crate::core::TransitionTable) of literal
/// targets.
///
/// Expands to a [`TableBuilder`](crate::builder::TableBuilder) chain and
/// evaluates to `Result<TransitionTable<C>, ConfigurationError>`. Computed
/// targets need the builder directly.
///
/// # Example
///
/// ```
/// use switchyard::transition_table;
/// use switchyard::TransitionTable;
///
/// let table: TransitionTable = transition_table! {
///     "green" => { "timer" => "yellow" },
///     "yellow" => { "timer" => "red" },
///     "red" => { "timer" => "green", "emergency" => "red" },
/// }
/// .unwrap();
///
/// assert_eq!(table.len(), 3);
/// ```
#[macro_export]
macro_rules! transition_table {
    (
        $(
            $state:expr => {
                $( $transition:expr => $target:expr ),* $(,)?
            }
        ),* $(,)?
    ) => {
        $crate::builder::TableBuilder::new()
            $(
                .state($state, |s| s $( .on($transition, $target) )*)
            )*
            .build()
    };
}
