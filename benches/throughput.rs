use brrtmux::dispatcher::find;
use brrtmux::server::{RecordedResponse, Request};
use brrtmux::Router;
use criterion::{criterion_group, criterion_main, Criterion};
use http::Method;
use std::hint::black_box;

fn zoo_router() -> Router {
    let mut mux = Router::new();
    mux.route("/").get(|w, _req| w.write(b"root"));
    mux.route("/zoo/animals")
        .get(|_w, _req| {})
        .post(|_w, _req| {});
    mux.route("/zoo/animals/:id")
        .get(|_w, _req| {})
        .put(|_w, _req| {})
        .patch(|_w, _req| {})
        .delete(|_w, _req| {});
    mux.route("/zoo/animals/:id/toys/:toy_id").get(|_w, _req| {});
    mux.route("/zoo/:category/animals/:id/habitats/:habitat_id/sections/:section_id")
        .get(|_w, _req| {});
    mux.route("/inventory/:warehouse_id/feeds/:feed_id/items/:item_id/batches/:batch_id")
        .post(|_w, _req| {});
    mux.route("/complex/:a/:b/:c/:d/:e/:f/:g/:h/:i").get(|_w, _req| {});
    mux.route("/zoo/health")
        .head(|_w, _req| {})
        .trace(|_w, _req| {});
    mux
}

const PATHS: [(Method, &str); 5] = [
    (Method::GET, "/zoo/animals/123"),
    (Method::GET, "/zoo/animals/123/toys/456"),
    (Method::GET, "/zoo/cats/animals/123/habitats/88/sections/5"),
    (Method::POST, "/inventory/1/feeds/2/items/3/batches/4"),
    (Method::GET, "/complex/1/2/3/4/5/6/7/8/9"),
];

fn bench_route_match(c: &mut Criterion) {
    let router = zoo_router();
    c.bench_function("route_match", |b| {
        b.iter(|| {
            for (method, path) in PATHS.iter() {
                let outcome = find(router.root(), method.as_str(), path);
                black_box(outcome.status());
            }
        })
    });
}

fn bench_dispatch(c: &mut Criterion) {
    let router = zoo_router();
    let requests: Vec<Request> = PATHS
        .iter()
        .map(|(method, path)| Request::new(method.clone(), format!("{path}?verbose=1")))
        .collect();
    c.bench_function("dispatch_with_bindings", |b| {
        b.iter(|| {
            for req in &requests {
                let mut res = RecordedResponse::new();
                router.serve(&mut res, req);
                black_box(res.status());
            }
        })
    });
}

fn bench_not_found(c: &mut Criterion) {
    let router = zoo_router();
    let req = Request::new(Method::GET, "/aquarium/fish/1");
    c.bench_function("dispatch_not_found", |b| {
        b.iter(|| {
            let mut res = RecordedResponse::new();
            router.serve(&mut res, black_box(&req));
            black_box(res.status());
        })
    });
}

criterion_group!(benches, bench_route_match, bench_dispatch, bench_not_found);
criterion_main!(benches);
