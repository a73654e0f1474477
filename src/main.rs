use std::sync::{Arc, Mutex};

use clap::Parser;
use ollama_rs::Ollama;

use souschef::args::Args;
use souschef::{
    Advisor, ChatQuery, ConsoleWatcher, Conversation, Dispatcher, LLMClient, OllamaLLM, Session,
    Transcriber, WhisperHttp, logger, prompt,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logger::init();
    let args = Args::parse();

    let ollama = Ollama::try_new(args.ollama_url.as_str())?;
    let llm: Arc<dyn LLMClient> = Arc::new(OllamaLLM::new(ollama, args.chat_model.clone()));

    println!("\nGenerating steps for: {}\n", args.food);
    let session = Session::prepare(llm.as_ref(), args.food.clone()).await?;
    println!("Steps:");
    for (i, step) in session.steps().iter().enumerate() {
        println!("  {}. {step}", i + 1);
    }

    let advisor = Advisor::new(Arc::clone(&llm));
    if let Some(allergens) = advisor.dish_allergens(session.food()).await? {
        println!("\n🥜 Watch out for: {}", allergens.join(", "));
    }

    let history = Arc::new(Mutex::new(Conversation::default()));
    let dispatcher = Dispatcher::new(Arc::clone(&llm), history);

    // Passive perception snapshot: described but kept out of history.
    if let Some(path) = &args.snapshot {
        let bytes = tokio::fs::read(path).await?;
        let query = ChatQuery::new("What do you see on the counter right now?")
            .with_frame(bytes)
            .with_persona(prompt::PERSONA)
            .remember(false);
        let seen = dispatcher.ask(query).await?;
        println!("\n{seen}");
    }

    // Spoken opening question, if a recording was supplied.
    if let Some(path) = &args.wav {
        let wav = tokio::fs::read(path).await?;
        let stt = WhisperHttp::new(args.whisper_url.clone(), args.whisper_model.clone());
        let question = stt.transcribe(&wav).await?;
        if question.is_empty() {
            println!("\n(no speech detected)");
        } else {
            println!("\nYou asked: {question}");
            let reply = dispatcher
                .ask(ChatQuery::new(question).with_persona(prompt::PERSONA))
                .await?;
            println!("{reply}");
        }
    }

    println!();
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut watcher = ConsoleWatcher::new(dispatcher, advisor, stdin, tokio::io::stdout());
    session.run(&mut watcher).await
}
