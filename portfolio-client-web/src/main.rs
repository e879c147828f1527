#[cfg(target_arch = "wasm32")]
fn main() {
    yew::Renderer::<portfolio_client_web::web::App>::new().render();
}

// il front end gira solo nel browser: `trunk serve` compila per wasm32-unknown-unknown
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    eprintln!("portfolio-client-web targets wasm32-unknown-unknown; build it with `trunk build`");
}
