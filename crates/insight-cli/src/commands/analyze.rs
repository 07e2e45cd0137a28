use std::error::Error;
use std::io::Read;
use std::path::PathBuf;

use clap::Subcommand;
use insight_core::analyzer::QUESTIONS;
use insight_core::{
    AnalysisClient, AnalyzerForm, ApiResponse, Config, Notification, ResourceType, UploadFile,
    ValidationError,
};

use super::{block_on, notify};

#[derive(Subcommand)]
pub enum AnalyzeAction {
    /// Analyze a web page
    Url {
        /// Web page URL
        url: String,
        #[command(flatten)]
        answers: Answers,
    },
    /// Analyze a YouTube video
    Youtube {
        /// YouTube video URL
        url: String,
        #[command(flatten)]
        answers: Answers,
    },
    /// Analyze a local document (.pdf, .doc, .docx, .txt, .md)
    File {
        /// Path to the document
        path: PathBuf,
        #[command(flatten)]
        answers: Answers,
    },
    /// Print the onboarding questions the answers should cover
    Questions,
}

#[derive(clap::Args)]
pub struct Answers {
    /// Answers to the onboarding questions ("-" reads stdin)
    #[arg(long)]
    answers: String,
}

impl Answers {
    fn resolve(self) -> Result<String, Box<dyn Error>> {
        if self.answers == "-" {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        } else {
            Ok(self.answers)
        }
    }
}

fn client(config: &Config) -> Result<AnalysisClient, Box<dyn Error>> {
    Ok(AnalysisClient::with_timeout(
        config.api_base_url(),
        config.request_timeout(),
    )?)
}

/// Announce a successful call. A failed one becomes the command's error.
fn settle<T>(
    config: &Config,
    resp: ApiResponse<T>,
    notice: Notification,
) -> Result<Option<T>, Box<dyn Error>> {
    if !resp.success {
        let message = match notice.description {
            Some(description) => format!("{}: {description}", notice.title),
            None => notice.title,
        };
        return Err(message.into());
    }
    notify(config, &notice);
    Ok(resp.data)
}

fn with_input_hint(resource_type: ResourceType, err: ValidationError) -> String {
    match resource_type.placeholder() {
        Some(example) => format!(
            "{err} ({} expected, e.g. {example})",
            resource_type.input_label()
        ),
        None => err.to_string(),
    }
}

pub fn run(action: AnalyzeAction) -> Result<(), Box<dyn Error>> {
    let mut form = AnalyzerForm::new();
    let answers = match action {
        AnalyzeAction::Questions => {
            for (i, question) in QUESTIONS.iter().enumerate() {
                println!("{}. {question}", i + 1);
            }
            return Ok(());
        }
        AnalyzeAction::Url { url, answers } => {
            form.set_url(url);
            answers
        }
        AnalyzeAction::Youtube { url, answers } => {
            form.select_type(ResourceType::Youtube);
            form.set_url(url);
            answers
        }
        AnalyzeAction::File { path, answers } => {
            let file = UploadFile::from_path(&path);
            if !file.is_accepted() {
                tracing::warn!(file = %file.file_name, "file type is not one the backend lists as supported");
            }
            form.select_type(ResourceType::File);
            form.select_file(file);
            answers
        }
    };
    form.set_learning_answers(answers.resolve()?);

    let resource_type = form.resource_type();
    let request = form
        .begin_submit()
        .map_err(|e| with_input_hint(resource_type, e))?;
    let config = Config::load()?;
    let client = client(&config)?;

    eprintln!("Analyzing...");
    let resp = block_on(async { Ok(client.analyze(&request).await) })?;
    form.finish_submit();

    let notice = Notification::for_analysis(&resp);
    let plan = settle(&config, resp, notice)?.ok_or("analysis response had no data")?;
    println!("{}", serde_json::to_string_pretty(&plan)?);
    Ok(())
}

pub fn history() -> Result<(), Box<dyn Error>> {
    let config = Config::load()?;
    let client = client(&config)?;
    eprintln!("Loading history...");
    let resp = block_on(async { Ok(client.history().await) })?;
    let notice = Notification::for_history(&resp);
    let entries = settle(&config, resp, notice)?.unwrap_or_default();
    println!("{}", serde_json::to_string_pretty(&entries)?);
    Ok(())
}

pub fn logout() -> Result<(), Box<dyn Error>> {
    let config = Config::load()?;
    let client = client(&config)?;
    let resp = block_on(async { Ok(client.sign_out().await) })?;
    let notice = Notification::for_sign_out(&resp);
    settle(&config, resp, notice)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_call_becomes_error_with_detail() {
        let config = Config::default();
        let resp: ApiResponse<()> = ApiResponse::failure("bad file");
        let notice = Notification::for_analysis(&resp);
        let err = settle(&config, resp, notice).unwrap_err();
        assert_eq!(err.to_string(), "Analysis failed: bad file");
    }

    #[test]
    fn successful_call_yields_data() {
        let config = Config::default();
        let resp = ApiResponse::ok(vec![1, 2]);
        let notice = Notification::for_history(&resp);
        assert_eq!(settle(&config, resp, notice).unwrap(), Some(vec![1, 2]));
    }

    #[test]
    fn url_errors_carry_an_example() {
        let err = ValidationError::Required("url".into());
        let hinted = with_input_hint(ResourceType::Youtube, err.clone());
        assert!(hinted.contains("YouTube Video URL"));
        assert!(hinted.contains("https://youtube.com/watch?v="));
        assert_eq!(with_input_hint(ResourceType::File, err.clone()), err.to_string());
    }
}
