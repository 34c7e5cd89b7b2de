use log::info;
use parrot_core::model::babble_input::BabbleInput;
use parrot_core::model::parrot::Parrot;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Train one model per corpus of the "data" directory (.txt files,
    // one sentence per line)
    let parrot = Parrot::new("./data")?;
    info!("Loaded models: {}", parrot.get_model_names().join(", "));

    // Create an input with no step bound and no retry
    let mut input = BabbleInput::new();

    // Number of retries if the generated sentence is already in the corpus
    input.nb_try = 10;

    // Give up on a walk that has not reached the end of a sentence after
    // 200 words
    input.set_max_steps(Some(200))?;

    // A zero bound is invalid
    match input.set_max_steps(Some(0)) {
        Ok(_) => println!("Should not happen"),
        Err(e) => println!("{e}"),
    }

    // Asking for a model that does not exist
    match parrot.model("unknown") {
        Ok(_) => println!("Should not happen"),
        Err(e) => println!("{e}"),
    }

    // Generate 5 sentences per model
    let mut rng = rand::rng();
    for name in parrot.get_model_names() {
        for i in 0..5 {
            println!("{} {}: {}", name, i + 1, parrot.speak(&name, &mut rng, &input)?);
        }
    }

    Ok(())
}
