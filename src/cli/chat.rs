use anyhow::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::chat::{ChatError, ChatGateway, Reply, SessionId, resolve_session_id};
use crate::core::AppConfig;
use crate::ollama::OllamaClient;

/// Runs one turn of the terminal chat. `session` is `None` until a
/// session is allocated, after which every turn stays on it, including
/// a session allocated as `0`.
async fn turn(
    gateway: &ChatGateway,
    session: &mut Option<SessionId>,
    line: &str,
) -> Result<Reply, ChatError> {
    let session_id = *session.get_or_insert_with(|| resolve_session_id(0));
    gateway.continue_session(session_id, line).await
}

pub async fn run(session_id: SessionId) -> Result<()> {
    let mut rl = DefaultEditor::new()?;

    let config = AppConfig::default();
    let gateway = ChatGateway::new(Box::new(OllamaClient::from_config(&config)));

    let mut session = (session_id != 0).then_some(session_id);

    loop {
        let readline = rl.readline(">>> ");
        match readline {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                let is_new = session.is_none();
                match turn(&gateway, &mut session, &line).await {
                    Ok(reply) => {
                        if is_new {
                            println!("[session {}]", reply.session_id);
                        }
                        println!("{}", reply.response);
                    }
                    Err(err) => eprintln!("{}", err),
                }
            }
            Err(ReadlineError::Interrupted) => break,
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }

    Ok(())
}
