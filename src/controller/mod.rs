// Controllers are plain structs that implement `Injectable` to pull their
// collaborators from the container, plus:
// - base_path() for where the router is nested
// - router(Arc<Self>) building the axum routes over the shared instance
mod json;

pub use json::JsonController;
