use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::http::header;
use axum::http::StatusCode;
use axum::response::Html;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;

use crate::run::Run;

/// The fixed route the sandbox configuration is served at.
const APPCONFIG_ROUTE: &str = "/appconfig/fioriSandboxConfig.json";

#[derive(clap::Args)]
pub struct ServeCommand {
	/// The address to listen on
	#[arg(short, long, default_value = "127.0.0.1:4004")]
	addr: SocketAddr,
}

/// The state shared by all routes.
struct App {
	options: launchpad::Options,
	registry: launchpad::LinkRegistry,
}

impl Run for ServeCommand {
	fn run(&self, options: &launchpad::Options) -> eyre::Result<()> {
		let runtime = tokio::runtime::Runtime::new()?;

		runtime.block_on(serve(self.addr, options.clone()))
	}
}

async fn serve(addr: SocketAddr, options: launchpad::Options) -> eyre::Result<()> {
	let base_path = options.base_path().to_owned();

	let mut registry = launchpad::LinkRegistry::new();
	launchpad::links::register(&mut registry, &base_path);

	let app = Arc::new(App { options, registry });

	let router = Router::new()
		.route("/", get(index))
		.route(&base_path, get(page))
		.route(APPCONFIG_ROUTE, get(appconfig))
		.with_state(app);

	let listener = TcpListener::bind(addr).await?;

	tracing::info!("serving launchpad at http://{addr}{base_path}");

	axum::serve(listener, router).await?;

	Ok(())
}

async fn page(State(app): State<Arc<App>>) -> Response {
	match launchpad::render_page(&app.options) {
		Ok(html) => Html(html).into_response(),
		Err(err) => fail(&err.into()),
	}
}

async fn appconfig(State(app): State<Arc<App>>) -> Response {
	match launchpad::render_config(&app.options) {
		Ok(json) => ([(header::CONTENT_TYPE, "application/json")], json).into_response(),
		Err(err) => fail(&err.into()),
	}
}

async fn index(State(app): State<Arc<App>>) -> Html<String> {
	// The index lists the links contributed by the registered providers.
	let items: String = app
		.registry
		.links(None)
		.iter()
		.map(|link| {
			format!(
				"<li><a href=\"{}\" title=\"{}\">{}</a></li>",
				link.href, link.title, link.name
			)
		})
		.collect();

	Html(format!(
		"<!DOCTYPE html><html><body><h1>Service index</h1><ul>{items}</ul></body></html>"
	))
}

/// Fails the request. No partial output is ever sent.
fn fail(err: &launchpad::Error) -> Response {
	tracing::error!("request failed: {err}");

	(StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
}
