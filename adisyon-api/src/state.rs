use adisyon_engine::OrderEngine;

#[derive(Clone)]
pub struct AppState {
    pub engine: OrderEngine,
}
