use std::sync::Mutex;

use actix_web::{get, put, web, App, HttpResponse, HttpServer, Responder};

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Deserialize;

use nonsense_core::sampling::random_date;
use nonsense_core::sampling::range::{DATE_FORMAT, today};
use nonsense_core::text::{Generator, Word};

/// Query parameters of the `/v1/sentences` and `/v1/paragraphs` endpoints.
///
/// A missing or zero bound uses the generator defaults.
#[derive(Deserialize)]
struct CountParams {
	min: Option<usize>,
	max: Option<usize>,
}

/// Query parameters of the `/v1/date` endpoint (`YYYY-MM-DD`).
#[derive(Deserialize)]
struct DateParams {
	min: Option<String>,
	max: Option<String>,
}

#[derive(Deserialize)]
struct SeedParams {
	value: Option<u64>,
}

struct SharedData {
	generator: Generator,
	rng: StdRng,
}

impl CountParams {
	fn bounds(&self) -> (usize, usize) {
		(self.min.unwrap_or(0), self.max.unwrap_or(0))
	}
}

/// HTTP GET endpoint `/v1/title`
#[get("/v1/title")]
async fn get_title(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Generator lock failed"),
	};
	let SharedData { generator, rng } = &mut *shared_data;

	match generator.title(rng) {
		Ok(result) => HttpResponse::Ok().body(result),
		Err(e) => HttpResponse::InternalServerError().body(e.to_string()),
	}
}

/// HTTP GET endpoint `/v1/sentence`
#[get("/v1/sentence")]
async fn get_sentence(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Generator lock failed"),
	};
	let SharedData { generator, rng } = &mut *shared_data;

	match generator.sentence(rng) {
		Ok(result) => HttpResponse::Ok().body(result),
		Err(e) => HttpResponse::InternalServerError().body(e.to_string()),
	}
}

/// HTTP GET endpoint `/v1/sentences`
///
/// Returns between `min` and `max` sentences.
#[get("/v1/sentences")]
async fn get_sentences(data: web::Data<Mutex<SharedData>>, query: web::Query<CountParams>) -> impl Responder {
	let (min, max) = query.bounds();
	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Generator lock failed"),
	};
	let SharedData { generator, rng } = &mut *shared_data;

	match generator.sentences(rng, min, max) {
		Ok(result) => HttpResponse::Ok().body(result),
		Err(e) => HttpResponse::BadRequest().body(e.to_string()),
	}
}

/// HTTP GET endpoint `/v1/paragraphs`
///
/// Returns between `min` and `max` wrapped paragraphs.
#[get("/v1/paragraphs")]
async fn get_paragraphs(data: web::Data<Mutex<SharedData>>, query: web::Query<CountParams>) -> impl Responder {
	let (min, max) = query.bounds();
	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Generator lock failed"),
	};
	let SharedData { generator, rng } = &mut *shared_data;

	match generator.paragraphs(rng, min, max) {
		Ok(result) => HttpResponse::Ok().body(result),
		Err(e) => HttpResponse::BadRequest().body(e.to_string()),
	}
}

/// HTTP GET endpoint `/v1/word/{category}`
///
/// Unknown categories answer with a noun, nouns as `singular|plural`.
#[get("/v1/word/{category}")]
async fn get_word(data: web::Data<Mutex<SharedData>>, path: web::Path<String>) -> impl Responder {
	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Generator lock failed"),
	};
	let SharedData { generator, rng } = &mut *shared_data;

	match generator.word_by_name(rng, &path) {
		Word::Plain(text) => HttpResponse::Ok().body(text.to_owned()),
		Word::Noun(noun) => HttpResponse::Ok().body(noun.to_entry()),
	}
}

/// HTTP GET endpoint `/v1/date`
///
/// Both bounds default to the current date.
#[get("/v1/date")]
async fn get_date(data: web::Data<Mutex<SharedData>>, query: web::Query<DateParams>) -> impl Responder {
	let current = today().format(DATE_FORMAT).to_string();
	let min = query.min.clone().unwrap_or_else(|| current.clone());
	let max = query.max.clone().unwrap_or(current);

	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Generator lock failed"),
	};

	match random_date(&mut shared_data.rng, &min, &max) {
		Ok(result) => HttpResponse::Ok().body(result),
		Err(e) => HttpResponse::BadRequest().body(e.to_string()),
	}
}

/// HTTP PUT endpoint `/v1/seed`
///
/// Reseeds the shared random generator so that following answers repeat.
#[put("/v1/seed")]
async fn put_seed(data: web::Data<Mutex<SharedData>>, query: web::Query<SeedParams>) -> impl Responder {
	let seed = match query.value {
		Some(seed) => seed,
		None => return HttpResponse::BadRequest().body("Missing seed value"),
	};

	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Generator lock failed"),
	};
	shared_data.rng = StdRng::seed_from_u64(seed);
	log::info!("reseeded generator with {seed}");

	HttpResponse::Ok().body("Generator reseeded")
}

/// Main entry point for the server.
///
/// Loads the lexicon from `./data`, wraps the generator and its random
/// source in a `Mutex` and starts an Actix-web HTTP server.
///
/// # Notes
/// - The server binds to 127.0.0.1:5000.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::init();

	let generator = Generator::from_dir("./data").map_err(std::io::Error::other)?;
	let shared_data = SharedData { generator, rng: StdRng::from_os_rng() };
	let shared_data = web::Data::new(Mutex::new(shared_data));

	log::info!("listening on 127.0.0.1:5000");
	HttpServer::new(move || {
		App::new()
			.app_data(shared_data.clone())
			.service(get_title)
			.service(get_sentence)
			.service(get_sentences)
			.service(get_paragraphs)
			.service(get_word)
			.service(get_date)
			.service(put_seed)
	})
		.bind(("127.0.0.1", 5000))?
		.run()
		.await
}

#[cfg(test)]
mod tests {
	use super::*;
	use actix_web::test;
	use nonsense_core::text::{Category, Lexicon};

	fn shared_data() -> web::Data<Mutex<SharedData>> {
		let lexicon = Lexicon::from_lists(Category::ALL.map(|category| match category {
			Category::Nouns => (category, vec!["cat|cats"]),
			Category::Adjectives => (category, vec!["red"]),
			_ => (category, vec!["word"]),
		}))
		.unwrap();
		web::Data::new(Mutex::new(SharedData { generator: Generator::new(lexicon), rng: StdRng::seed_from_u64(1) }))
	}

	#[actix_web::test]
	async fn word_endpoint_formats_nouns() {
		let app = test::init_service(App::new().app_data(shared_data()).service(get_word)).await;

		let req = test::TestRequest::get().uri("/v1/word/nouns").to_request();
		let body = test::call_and_read_body(&app, req).await;
		assert_eq!(body, "cat|cats");

		let req = test::TestRequest::get().uri("/v1/word/adjectives").to_request();
		let body = test::call_and_read_body(&app, req).await;
		assert_eq!(body, "red");

		// Unknown categories fall back to nouns
		let req = test::TestRequest::get().uri("/v1/word/colours").to_request();
		let body = test::call_and_read_body(&app, req).await;
		assert_eq!(body, "cat|cats");
	}

	#[actix_web::test]
	async fn reversed_sentence_bounds_are_a_bad_request() {
		let app = test::init_service(App::new().app_data(shared_data()).service(get_sentences)).await;

		let req = test::TestRequest::get().uri("/v1/sentences?min=3&max=3").to_request();
		let resp = test::call_service(&app, req).await;
		assert!(resp.status().is_success());

		let req = test::TestRequest::get().uri("/v1/sentences?min=5&max=2").to_request();
		let resp = test::call_service(&app, req).await;
		assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
	}

	#[actix_web::test]
	async fn date_endpoint_stays_in_range() {
		let app = test::init_service(App::new().app_data(shared_data()).service(get_date)).await;

		let req = test::TestRequest::get().uri("/v1/date?min=2024-01-01&max=2024-01-03").to_request();
		let body = test::call_and_read_body(&app, req).await;
		assert!(["2024-01-01", "2024-01-02", "2024-01-03"].contains(&std::str::from_utf8(&body).unwrap()));

		let req = test::TestRequest::get().uri("/v1/date?min=yesterday").to_request();
		let resp = test::call_service(&app, req).await;
		assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
	}

	#[actix_web::test]
	async fn reseeding_repeats_titles() {
		let app = test::init_service(
			App::new().app_data(shared_data()).service(get_title).service(put_seed),
		)
		.await;

		let mut titles = Vec::new();
		for _ in 0..2 {
			let req = test::TestRequest::put().uri("/v1/seed?value=9").to_request();
			assert!(test::call_service(&app, req).await.status().is_success());
			let req = test::TestRequest::get().uri("/v1/title").to_request();
			titles.push(test::call_and_read_body(&app, req).await);
		}
		assert_eq!(titles[0], titles[1]);
	}
}
