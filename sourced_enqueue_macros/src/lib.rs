mod typed_message;

use proc_macro::TokenStream;

/// Derive macro binding a payload struct to a message name and kind.
///
/// # Usage
///
/// ```ignore
/// #[derive(Serialize, Deserialize, TypedMessage)]
/// #[message(kind = "command", name = "todo.create")]
/// struct CreateTodo {
///     id: String,
///     title: String,
/// }
/// ```
///
/// Expands to:
///
/// ```ignore
/// impl sourced_enqueue::TypedMessage for CreateTodo {
///     const NAME: &'static str = "todo.create";
///     const KIND: sourced_enqueue::MessageKind = sourced_enqueue::MessageKind::Command;
/// }
/// ```
///
/// Attributes:
/// - `kind`: required, one of `"command"`, `"event"`, `"query"`
/// - `name`: optional, defaults to the snake_case struct name (`CreateTodo` -> `"create_todo"`)
#[proc_macro_derive(TypedMessage, attributes(message))]
pub fn derive_typed_message(input: TokenStream) -> TokenStream {
    typed_message::derive_typed_message(input)
}
