#![allow(clippy::unwrap_used)]
#![allow(deprecated)]

use talent_server::{catalog, AppState, StubConfig};


pub const TEST_TOKEN: &str = "test-token";

fn stub_state(free_searches: u32) -> AppState {
    let config = StubConfig {
        tokens: vec![TEST_TOKEN.to_string()],
        free_searches,
    };
    AppState::new(&config, catalog::seed())
}

/// Stand-in API on the current runtime. Returns its base URL.
pub async fn spawn_stub_server(free_searches: u32) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());

    tokio::spawn(talent_server::serve(listener, stub_state(free_searches)));

    url
}

/// Stand-in API on a background thread with its own runtime, for tests
/// that drive the binary. Returns its base URL.
pub fn start_stub_server(free_searches: u32) -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.set_nonblocking(true).unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());

    std::thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::from_std(listener).unwrap();
            talent_server::serve(listener, stub_state(free_searches))
                .await
                .unwrap();
        });
    });

    url
}
