use std::path::PathBuf;

use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{App, HttpResponse, HttpServer, Responder, get, web};
use clap::Parser;
use log::info;
use serde::{Deserialize, Serialize};

use namer_core::{Engine, NameChooser};

/// Command line configuration of the server.
#[derive(Parser, Debug)]
#[command(name = "namer-server", about = "HTTP front-end of the name generator")]
struct Args {
	/// Data directory holding `config.json`; a `config.bin` snapshot is
	/// written next to it on first start (defaults to the embedded data)
	#[arg(long)]
	data: Option<PathBuf>,

	/// Address to bind
	#[arg(long, default_value = "127.0.0.1")]
	host: String,

	/// Port to bind
	#[arg(long, default_value_t = 5000)]
	port: u16,

	/// Seed for reproducible output
	#[arg(long)]
	seed: Option<u64>,
}

/// Query parameters shared by every generation endpoint.
///
/// Without a tag (or with an unknown one) a random tag is used.
#[derive(Deserialize)]
struct TagQuery {
	tag: Option<String>,
}

/// Body of the endpoints returning a single string.
#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct NameResponse {
	name: String,
}

impl TagQuery {
	/// Runs `generate` through a scoped view when a tag was given.
	fn generate<T>(&self, engine: &Engine, generate: impl Fn(&dyn NameChooser) -> T) -> T {
		match &self.tag {
			Some(tag) => generate(&engine.tag(tag)),
			None => generate(engine),
		}
	}
}

/// HTTP GET endpoint `/v1/tags`
///
/// Lists the registered tags in configuration order.
#[get("/v1/tags")]
async fn get_tags(data: web::Data<Engine>) -> impl Responder {
	HttpResponse::Ok().json(data.tags())
}

#[get("/v1/town")]
async fn get_town(data: web::Data<Engine>, query: web::Query<TagQuery>) -> impl Responder {
	let name = query.generate(&data, |namer| namer.town());
	HttpResponse::Ok().json(NameResponse { name })
}

#[get("/v1/place")]
async fn get_place(data: web::Data<Engine>, query: web::Query<TagQuery>) -> impl Responder {
	let name = query.generate(&data, |namer| namer.place());
	HttpResponse::Ok().json(NameResponse { name })
}

#[get("/v1/male")]
async fn get_male(data: web::Data<Engine>, query: web::Query<TagQuery>) -> impl Responder {
	HttpResponse::Ok().json(query.generate(&data, |namer| namer.male()))
}

#[get("/v1/female")]
async fn get_female(data: web::Data<Engine>, query: web::Query<TagQuery>) -> impl Responder {
	HttpResponse::Ok().json(query.generate(&data, |namer| namer.female()))
}

/// HTTP GET endpoint `/v1/river`
///
/// Returns `{"name": ..., "kind": ...}` where `kind` is a descriptor
/// like "brook" or "creek".
#[get("/v1/river")]
async fn get_river(data: web::Data<Engine>, query: web::Query<TagQuery>) -> impl Responder {
	HttpResponse::Ok().json(query.generate(&data, |namer| namer.river()))
}

fn load_engine(args: &Args) -> std::io::Result<Engine> {
	let engine = match &args.data {
		Some(dir) => Engine::load_cached(dir).map_err(std::io::Error::other)?,
		None => Engine::new().map_err(std::io::Error::other)?,
	};
	Ok(match args.seed {
		Some(seed) => engine.with_seed(seed),
		None => engine,
	})
}

/// Main entry point for the server.
///
/// Loads the name tables once and shares the engine between workers.
/// The engine synchronizes its own random source, so no outer lock is needed.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::init();
	let args = Args::parse();

	let engine = web::Data::new(load_engine(&args)?);
	info!("serving tags [{}] on {}:{}", engine.tags().join(", "), args.host, args.port);

	HttpServer::new(move || {
		App::new()
			.wrap(Logger::default())
			.wrap(Cors::default().allow_any_origin().allowed_methods(vec!["GET"]))
			.app_data(engine.clone())
			.service(get_tags)
			.service(get_town)
			.service(get_place)
			.service(get_male)
			.service(get_female)
			.service(get_river)
	})
		.bind((args.host.as_str(), args.port))?
		.run()
		.await
}
