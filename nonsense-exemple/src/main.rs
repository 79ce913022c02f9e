use chrono::NaiveDate;
use rand::SeedableRng;
use rand::rngs::StdRng;

use nonsense_core::content::{
    DocumentOptions, MemoryRepository, ReplyOptions, ReplyTarget, UserOptions, generate_documents,
    generate_replies, generate_users,
};
use nonsense_core::sampling::{HierarchySampler, HierarchyState, random_date};
use nonsense_core::text::{Category, Generator, GeneratorConfig, Template};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Load every word list from the "data" directory (<category>.txt files)
    // A binary cache (lexicon.bin) is written on first load and reused while the lists are unchanged
    let generator = Generator::from_dir("./data")?;

    // Every random draw comes from this generator: same seed, same output
    let mut rng = StdRng::seed_from_u64(42);

    println!("Title: {}", generator.title(&mut rng)?);
    println!("Sentence: {}", generator.sentence(&mut rng)?);

    // 0 means "use the configured bound" (2..=12 sentences by default)
    println!("Sentences: {}", generator.sentences(&mut rng, 2, 4)?);
    print!("Paragraphs: {}", generator.paragraphs(&mut rng, 2, 2)?);

    // The configured bounds can be replaced, the lexicon stays shared
    let short = generator.clone().with_config(GeneratorConfig::default().with_paragraphs(1, 2));
    let config = short.config();
    println!("Short bodies: {}..={} paragraphs", config.min_paragraphs, config.max_paragraphs);
    print!("Short: {}", short.paragraphs(&mut rng, 0, 0)?);
    println!("Nouns loaded: {}", short.lexicon().len(Category::Nouns));

    // Single words; unknown categories fall back to nouns
    let noun = generator.noun(&mut rng);
    println!("Noun: {} / {}", noun.singular, noun.plural);
    println!("Adjective: {}", generator.word(&mut rng, Category::Adjectives).text());
    println!("Unknown category: {}", generator.word_by_name(&mut rng, "colours").text());

    // Custom templates are filled the same way as the registered ones
    let template = Template::parse("[interjections] ! [determiners] [adjectives] [nouns] [verbs] .");
    println!("Custom: {}", generator.instantiate(&mut rng, &template)?.trim());

    // A template using a category three times is refused
    let overused = Template::parse("[verbs] [verbs] [verbs] .");
    match generator.instantiate(&mut rng, &overused) {
        Ok(_) => println!("Should not happen"),
        Err(e) => println!("Refused: {e}"),
    }

    // Dates are drawn uniformly, reversed bounds are swapped
    println!("Date: {}", random_date(&mut rng, "2024-01-10", "2024-01-01")?);

    // Walk a few hierarchy steps by hand
    let mut state = HierarchyState::new();
    for id in 1..=8 {
        state = HierarchySampler::advance(&mut rng, state, 3);
        println!("Unit {id}: parent {} depth {}", state.parent_id, state.current_depth);
        state.record(id);
    }

    // Fill an in-memory repository: users, pages with terms, then replies
    let mut repository = MemoryRepository::new();
    generate_users(&mut repository, &generator, &mut rng, &UserOptions { count: 5, ..UserOptions::default() })?;

    let document_options = DocumentOptions {
        count: 10,
        content_type: "page".to_owned(),
        min_date: NaiveDate::from_ymd_opt(2024, 1, 1).ok_or("invalid date")?,
        max_date: NaiveDate::from_ymd_opt(2024, 12, 31).ok_or("invalid date")?,
        max_depth: 3,
        max_length: 2,
        with_terms: true,
        ..DocumentOptions::default()
    };
    generate_documents(&mut repository, &generator, &mut rng, &document_options)?;

    // Replies are dated between their page date and today
    let reply_options = ReplyOptions {
        target: ReplyTarget::ContentType { name: "page".to_owned(), limit: 10 },
        max_count: 4,
        ..ReplyOptions::default()
    };
    let replies = generate_replies(&mut repository, &generator, &mut rng, &reply_options)?;

    for stored in repository.documents_stored() {
        println!(
            "Page {} (parent {}, {}): {}",
            stored.id, stored.value.parent, stored.value.date, stored.value.title
        );
    }
    println!("{} users, {} terms, {} replies", repository.users_stored().len(), repository.terms_stored().len(), replies.len());

    Ok(())
}
