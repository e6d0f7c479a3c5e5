use anyhow::Context;
use brrtmux::config::RouterConfig;
use brrtmux::handlers::{handler_fn, BoxedHandler};
use brrtmux::logging::{init_logging_with_config, LogConfig};
use brrtmux::server::{status_reason, RecordedResponse, Request, ResponseWriter};
use brrtmux::Router;
use clap::Parser;
use http::header::HeaderValue;
use http::Method;
use std::path::PathBuf;

/// Dispatch one request against a demo route table and print the response.
#[derive(Parser)]
#[command(name = "brrtmux")]
#[command(about = "brrtmux request router demo", long_about = None)]
struct Cli {
    /// Router configuration file (TOML with options/trace/head_on_get)
    #[arg(short, long, env = "BRRTMUX_CONFIG")]
    config: Option<PathBuf>,

    /// Enable the default TRACE handler
    #[arg(long, default_value_t = false)]
    trace: bool,

    /// Disable the default OPTIONS handler
    #[arg(long, default_value_t = false)]
    no_options: bool,

    /// Do not add HEAD when GET is registered
    #[arg(long, default_value_t = false)]
    no_head: bool,

    /// Request header as `Name: value`, may be repeated
    #[arg(short = 'H', long = "header")]
    headers: Vec<String>,

    /// Print the routing table before dispatching
    #[arg(long, default_value_t = false)]
    routes: bool,

    /// HTTP method, e.g. GET
    method: String,

    /// Request target, e.g. /items/42?verbose=1
    target: String,
}

/// Route-only middleware: tags the response before calling the wrapped handler.
fn tagged(tag: &'static str, next: BoxedHandler) -> impl Fn(&mut dyn ResponseWriter, &Request) + Send + Sync {
    move |w, req| {
        w.headers_mut()
            .append("x-route-tag", HeaderValue::from_static(tag));
        next.serve(w, req);
    }
}

fn demo_router(config: RouterConfig) -> Router {
    let mut mux = Router::with_config(config);

    mux.route("/").get(|w, _req| w.write(b"Hello World!"));
    mux.route("/hello/:name").get(|w, req| {
        let name = req.get_query_param(":name").unwrap_or_default();
        w.write(format!("Hello, {name}!").as_bytes());
    });

    let show = |verb: &'static str| {
        move |w: &mut dyn ResponseWriter, req: &Request| {
            let id = req.get_query_param(":id").unwrap_or_default();
            w.write(format!("{verb} item {id}").as_bytes());
        }
    };
    let mut items = mux
        .route("/items")
        .get(tagged("items", handler_fn(|w, _req| w.write(b"[]"))));
    items
        .route("/:id")
        .get(show("GET"))
        .post(show("POST"))
        .put(show("PUT"))
        .delete(|w, _req| w.write_status(204));

    mux
}

fn main() -> anyhow::Result<()> {
    init_logging_with_config(&LogConfig::from_env())?;
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => RouterConfig::from_toml_file(path)
            .with_context(|| format!("loading router config from {}", path.display()))?,
        None => RouterConfig::from_env(),
    };
    if cli.trace {
        config.trace_enabled = true;
    }
    if cli.no_options {
        config.options_enabled = false;
    }
    if cli.no_head {
        config.add_head_on_get = false;
    }

    let mux = demo_router(config);
    if cli.routes {
        for route in mux.routes() {
            println!("[route] {} -> {}", route.path, route.methods.join(", "));
        }
    }

    let method = Method::from_bytes(cli.method.to_ascii_uppercase().as_bytes())
        .with_context(|| format!("invalid method '{}'", cli.method))?;
    let mut req = Request::new(method, cli.target.as_str());
    for header in &cli.headers {
        let (name, value) = header
            .split_once(':')
            .with_context(|| format!("header '{header}' is not 'Name: value'"))?;
        req = req.header(name.trim(), value.trim());
    }

    let mut res = RecordedResponse::new();
    mux.serve(&mut res, &req);

    println!("{:?} {} {}", req.version, res.status(), status_reason(res.status()));
    for (name, value) in res.headers() {
        println!("{}: {}", name, value.to_str().unwrap_or("<binary>"));
    }
    println!();
    print!("{}", res.body_str());

    Ok(())
}
