mod component;
mod system;

use proc_macro::TokenStream;

#[proc_macro_derive(Component)]
pub fn derive_component(item: TokenStream) -> TokenStream {
    component::derive_component(item)
}

/// Derive an empty `System` impl, for systems that only need their interest set and are driven
/// from outside the world.
#[proc_macro_derive(System)]
pub fn derive_system(item: TokenStream) -> TokenStream {
    system::derive_system(item)
}
