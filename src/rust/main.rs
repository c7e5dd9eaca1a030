use amygdala::{render, ArtifactPaths, EmotionPredictor};
use clap::Parser;
use log::{error, info, warn};
use std::borrow::Cow;
use std::io::{self, BufRead, Write};
use std::time::Instant;

/// Predicts the emotion expressed in each line of text typed at the prompt.
///
/// Reads tfidf_vectorizer.json and tfidf_svc_model.json from the working directory.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {}

fn is_exit_command(line: &str) -> bool {
    let line = line.trim();
    line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit")
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let _args = Args::parse();

    println!("{}\n", render::banner());

    let start_time = Instant::now();
    info!("Loading artifacts...");
    let predictor = match EmotionPredictor::from_artifacts(&ArtifactPaths::default()) {
        Ok(predictor) => predictor,
        Err(e) => {
            error!("Startup aborted: {}", e);
            eprintln!("{}", render::load_failure(&e));
            std::process::exit(1);
        }
    };
    info!("Artifacts loaded (took {:.2?})", start_time.elapsed());
    println!("{}\n", render::loaded(predictor.sources()));

    run_prompt(&predictor, io::stdin().lock(), io::stdout().lock())?;
    Ok(())
}

/// One line in, one rendered outcome out, until EOF or an exit command.
fn run_prompt<R: BufRead, W: Write>(predictor: &EmotionPredictor, mut input: R, mut output: W) -> io::Result<()> {
    let mut requests = 0usize;
    loop {
        write!(output, "{}", render::prompt())?;
        output.flush()?;

        let mut buf = Vec::new();
        if input.read_until(b'\n', &mut buf)? == 0 {
            writeln!(output)?;
            break;
        }
        // Undecodable bytes are a property of this one request, not of the session
        let line = String::from_utf8_lossy(&buf);
        if let Cow::Owned(_) = line {
            warn!("Input line was not valid UTF-8; replaced undecodable bytes");
        }
        let text = line.trim_end_matches(['\r', '\n']);
        if is_exit_command(text) {
            break;
        }

        requests += 1;
        let request_start = Instant::now();
        let outcome = predictor.predict_emotion(text);
        info!("Request {} handled in {:.2?}", requests, request_start.elapsed());
        writeln!(output, "{}\n", render::outcome(&outcome))?;
    }
    info!("Session ended after {} requests", requests);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use amygdala::{LinearSvc, TfidfVectorizer};
    use std::collections::HashMap;

    fn predictor() -> EmotionPredictor {
        let vocabulary = HashMap::from([("amazing".to_string(), 0)]);
        let vectorizer = TfidfVectorizer::new(vocabulary, vec![1.0]).unwrap();
        let classifier = LinearSvc::new(vec![4, 2], vec![vec![1.0]], vec![0.0]).unwrap();
        EmotionPredictor::new(vectorizer, classifier)
    }

    #[test]
    fn test_exit_commands() {
        assert!(is_exit_command("exit"));
        assert!(is_exit_command("  QUIT "));
        assert!(!is_exit_command("exiting soon"));
    }

    #[test]
    fn test_prompt_session() {
        colored::control::set_override(false);
        let input = b"I feel amazing today!\n   \nsomething else\nexit\nnever read\n";
        let mut output = Vec::new();
        run_prompt(&predictor(), &input[..], &mut output).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("😊 Joy"));
        assert!(output.contains("Please enter some text!"));
        assert!(output.contains("😢 Sadness"));
        assert!(!output.contains("never read"));
    }

    #[test]
    fn test_invalid_utf8_line_does_not_end_session() {
        colored::control::set_override(false);
        let input = b"\xff\xfe bad bytes\nI feel amazing today!\nexit\n";
        let mut output = Vec::new();
        run_prompt(&predictor(), &input[..], &mut output).unwrap();

        let output = String::from_utf8(output).unwrap();
        // The undecodable line is still classified as an ordinary request
        assert!(output.contains("Input: \u{FFFD}\u{FFFD} bad bytes"));
        assert!(output.contains("😊 Joy"));
    }

    #[test]
    fn test_prompt_stops_at_eof() {
        let mut output = Vec::new();
        run_prompt(&predictor(), &b""[..], &mut output).unwrap();
        assert!(!output.is_empty());
    }
}
