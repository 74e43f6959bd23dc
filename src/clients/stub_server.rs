use actix_web::{dev::ServerHandle, web, App, HttpServer};

/// Serves `routes` on an ephemeral localhost port and returns its base URL.
pub(crate) fn spawn<F>(routes: F) -> (String, ServerHandle)
where
    F: Fn(&mut web::ServiceConfig) + Clone + Send + 'static,
{
    let server = HttpServer::new(move || App::new().configure(routes.clone()))
        .workers(1)
        .disable_signals()
        .bind(("127.0.0.1", 0))
        .expect("bind stub server");
    let addr = server.addrs()[0];
    let server = server.run();
    let handle = server.handle();
    actix_web::rt::spawn(server);
    (format!("http://{}", addr), handle)
}

/// Header value as an owned string, if present and valid UTF-8.
pub(crate) fn header(req: &actix_web::HttpRequest, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}
