use std::env;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use actix_cors::Cors;
use actix_web::{get, put, web, App, HttpResponse, HttpServer, Responder};
use log::{error, info};
use serde::{Deserialize, Serialize};

use parrot_core::ParrotError;
use parrot_core::io::list_files;
use parrot_core::model::babble_input::BabbleInput;
use parrot_core::model::parrot::Parrot;

/// Walks are always bounded on the server so a request cannot hang a worker.
const DEFAULT_MAX_STEPS: usize = 1000;

/// Struct representing query parameters for the `/v1/babble` endpoint
#[derive(Deserialize)]
struct BabbleParams {
	model: String,
	max_steps: Option<usize>,
	nb_try: Option<usize>,
}

#[derive(Deserialize)]
struct ModelQuery {
	names: Option<String>
}

#[derive(Deserialize)]
struct TransitionQuery {
	model: String,
	token: String,
}

#[derive(Serialize)]
struct Transition<'a> {
	token: &'a str,
	probability: f64,
}

struct SharedData {
	data_dir: PathBuf,
	parrot: Parrot
}

impl BabbleParams {
	/// Builds the generation input, applying server defaults.
	fn babble_input(&self) -> Result<BabbleInput, ParrotError> {
		let mut input = BabbleInput::new();
		input.nb_try = self.nb_try.unwrap_or(5);
		input.set_max_steps(Some(self.max_steps.unwrap_or(DEFAULT_MAX_STEPS)))?;
		Ok(input)
	}
}

/// Resolves a model name to its corpus file in `data_dir`.
///
/// Only names of `.txt` files listed in the directory are accepted, so a
/// name can never point outside of it.
fn corpus_path(data_dir: &Path, name: &str) -> Result<PathBuf, ParrotError> {
	if name.contains(['/', '\\']) || name.contains("..") {
		return Err(ParrotError::InvalidConfig(format!("Invalid model name: {}", name)));
	}
	let file = format!("{}.txt", name);
	if !list_files(data_dir, "txt")?.contains(&file) {
		return Err(ParrotError::UnknownModel(name.to_owned()));
	}
	Ok(data_dir.join(file))
}

/// Model names of corpus files (extension stripped).
fn model_names(files: &[String]) -> Vec<&str> {
	files.iter().filter_map(|file| file.strip_suffix(".txt")).collect()
}

/// Maps a library error to an HTTP response.
fn error_response(e: ParrotError) -> HttpResponse {
	match e {
		ParrotError::UnknownModel(_) | ParrotError::UnknownToken(_) => HttpResponse::NotFound().body(e.to_string()),
		ParrotError::InvalidConfig(_) | ParrotError::ModelAlreadyLoaded(_) => HttpResponse::BadRequest().body(e.to_string()),
		_ => {
			error!("{e}");
			HttpResponse::InternalServerError().body(e.to_string())
		}
	}
}

/// HTTP GET endpoint `/v1/babble`
///
/// Generates a sentence from the named model.
/// Returns the sentence as the response body.
#[get("/v1/babble")]
async fn get_babble(data: web::Data<RwLock<SharedData>>, query: web::Query<BabbleParams>) -> impl Responder {
	let input = match query.babble_input() {
		Ok(input) => input,
		Err(e) => return error_response(e)
	};

	let shared_data = match data.read() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};

	match shared_data.parrot.speak(&query.model, &mut rand::rng(), &input) {
		Ok(result) => HttpResponse::Ok().body(result),
		Err(e) => error_response(e),
	}
}

/// HTTP GET endpoint `/v1/transitions`
///
/// Lists the possible next tokens of a token with their probabilities.
#[get("/v1/transitions")]
async fn get_transitions(data: web::Data<RwLock<SharedData>>, query: web::Query<TransitionQuery>) -> impl Responder {
	let shared_data = match data.read() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};

	let next_states = match shared_data.parrot.model(&query.model).and_then(|model| model.next_states(&query.token)) {
		Ok(next_states) => next_states,
		Err(e) => return error_response(e),
	};

	let transitions: Vec<Transition> = next_states
		.into_iter()
		.map(|(token, probability)| Transition { token, probability })
		.collect();
	HttpResponse::Ok().json(transitions)
}

#[get("/v1/models")]
async fn get_models(data: web::Data<RwLock<SharedData>>) -> impl Responder {
	let shared_data = match data.read() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};
	match list_files(&shared_data.data_dir, "txt") {
		Ok(files) => HttpResponse::Ok().body(model_names(&files).join("\n")),
		Err(e) => error_response(e)
	}
}

#[get("/v1/loaded_models")]
async fn get_loaded_models(data: web::Data<RwLock<SharedData>>) -> impl Responder {
	let shared_data = match data.read() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};
	HttpResponse::Ok().body(shared_data.parrot.get_model_names().join("\n"))
}

/// HTTP PUT endpoint `/v1/load_models`
///
/// Replaces the loaded models with the comma-separated corpora of `names`.
/// The previous models stay loaded if any corpus fails.
#[put("/v1/load_models")]
async fn put_model(data: web::Data<RwLock<SharedData>>, query: web::Query<ModelQuery>) -> impl Responder {
	let query_names = match &query.names {
		Some(s) if !s.trim().is_empty() => s.trim(),
		_ => return HttpResponse::BadRequest().body("Missing or empty model name"),
	};

	let model_names: Vec<&str> = query_names
		.split(',')
		.map(|s| s.trim())
		.filter(|s| !s.is_empty())
		.collect();

	let mut shared_data = match data.write() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};

	let mut parrot = Parrot::default();
	for name in model_names {
		let loaded = corpus_path(&shared_data.data_dir, name).and_then(|path| parrot.load_model(path));
		if let Err(e) = loaded {
			return error_response(e);
		}
	}

	info!("Loaded models: {}", parrot.get_model_names().join(", "));
	shared_data.parrot = parrot;
	HttpResponse::Ok().body("Models loaded successfully")
}

/// Main entry point for the server.
///
/// Starts with no model loaded; corpora are trained on `PUT /v1/load_models`.
///
/// # Environment
/// - `PARROT_DATA_DIR`: corpus directory (default `./data`)
/// - `PARROT_BIND`: listen address (default `127.0.0.1:5000`)
/// - `RUST_LOG`: log filter
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::init();

	let data_dir = PathBuf::from(env::var("PARROT_DATA_DIR").unwrap_or_else(|_| "./data".to_owned()));
	let bind = env::var("PARROT_BIND").unwrap_or_else(|_| "127.0.0.1:5000".to_owned());

	let shared_data = SharedData {
		data_dir,
		parrot: Parrot::default(),
	};
	let shared_model = web::Data::new(RwLock::new(shared_data));

	info!("Listening on {}", bind);
	HttpServer::new(move || {
		App::new()
			.wrap(Cors::permissive())
			.app_data(shared_model.clone())
			.service(get_babble)
			.service(get_transitions)
			.service(get_models)
			.service(put_model)
			.service(get_loaded_models)
	})
		.bind(bind)?
		.run()
		.await
}

#[cfg(test)]
mod tests {
	use super::*;
	use actix_web::http::StatusCode;
	use actix_web::test;
	use std::fs;

	fn shared(data_dir: &Path) -> web::Data<RwLock<SharedData>> {
		web::Data::new(RwLock::new(SharedData {
			data_dir: data_dir.to_path_buf(),
			parrot: Parrot::default(),
		}))
	}

	#[actix_web::test]
	async fn load_models_stays_inside_data_dir() {
		let root = tempfile::tempdir().unwrap();
		let data_dir = root.path().join("data");
		fs::create_dir(&data_dir).unwrap();
		fs::write(root.path().join("secret.txt"), "top secret words\n").unwrap();
		fs::write(data_dir.join("polly.txt"), "polly wants a cracker\n").unwrap();

		let app = test::init_service(
			App::new()
				.app_data(shared(&data_dir))
				.service(put_model)
				.service(get_babble),
		)
		.await;

		let secret = root.path().join("secret");
		for names in ["../secret", "polly,../secret", "..", secret.to_str().unwrap()] {
			let req = test::TestRequest::put().uri(&format!("/v1/load_models?names={}", names)).to_request();
			let resp = test::call_service(&app, req).await;
			assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "names={names}");
		}

		let req = test::TestRequest::put().uri("/v1/load_models?names=unknown").to_request();
		assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

		let req = test::TestRequest::get().uri("/v1/babble?model=secret").to_request();
		assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

		let req = test::TestRequest::put().uri("/v1/load_models?names=polly").to_request();
		assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

		let req = test::TestRequest::get().uri("/v1/babble?model=polly").to_request();
		let body = test::read_body(test::call_service(&app, req).await).await;
		assert_eq!(std::str::from_utf8(&body).unwrap(), "polly wants a cracker");
	}

	#[actix_web::test]
	async fn transitions_and_not_found_mapping() {
		let data_dir = tempfile::tempdir().unwrap();
		fs::write(data_dir.path().join("polly.txt"), "polly wants a cracker\n").unwrap();

		let app = test::init_service(
			App::new()
				.app_data(shared(data_dir.path()))
				.service(put_model)
				.service(get_transitions),
		)
		.await;

		let req = test::TestRequest::put().uri("/v1/load_models?names=polly").to_request();
		assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

		let req = test::TestRequest::get().uri("/v1/transitions?model=polly&token=polly").to_request();
		let resp = test::call_service(&app, req).await;
		assert_eq!(resp.status(), StatusCode::OK);
		let body = test::read_body(resp).await;
		assert_eq!(std::str::from_utf8(&body).unwrap(), r#"[{"token":"wants","probability":1.0}]"#);

		let req = test::TestRequest::get().uri("/v1/transitions?model=vader&token=polly").to_request();
		assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

		let req = test::TestRequest::get().uri("/v1/transitions?model=polly&token=biscuit").to_request();
		assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
	}

	#[actix_web::test]
	async fn models_strip_only_the_extension() {
		let data_dir = tempfile::tempdir().unwrap();
		fs::write(data_dir.path().join("polly.txt"), "polly wants a cracker\n").unwrap();
		fs::write(data_dir.path().join("notes.txt.bak.txt"), "hello\n").unwrap();

		let app = test::init_service(App::new().app_data(shared(data_dir.path())).service(get_models)).await;
		let req = test::TestRequest::get().uri("/v1/models").to_request();
		let body = test::read_body(test::call_service(&app, req).await).await;
		assert_eq!(std::str::from_utf8(&body).unwrap(), "notes.txt.bak\npolly");
	}

	#[::core::prelude::v1::test]
	fn library_errors_map_to_statuses() {
		let not_found = [ParrotError::UnknownModel("vader".to_owned()), ParrotError::UnknownToken("biscuit".to_owned())];
		for e in not_found {
			assert_eq!(error_response(e).status(), StatusCode::NOT_FOUND);
		}
		let e = ParrotError::GenerationTimeout { steps: 3 };
		assert_eq!(error_response(e).status(), StatusCode::INTERNAL_SERVER_ERROR);
	}

	#[::core::prelude::v1::test]
	fn babble_params_apply_defaults() {
		let params = BabbleParams { model: "yoda".to_owned(), max_steps: None, nb_try: None };
		let input = params.babble_input().unwrap();
		assert_eq!(input.max_steps(), Some(DEFAULT_MAX_STEPS));
		assert_eq!(input.nb_try, 5);
	}

	#[::core::prelude::v1::test]
	fn zero_step_bound_is_a_bad_request() {
		let params = BabbleParams { model: "yoda".to_owned(), max_steps: Some(0), nb_try: None };
		let e = params.babble_input().unwrap_err();
		assert_eq!(error_response(e).status(), StatusCode::BAD_REQUEST);
	}
}
