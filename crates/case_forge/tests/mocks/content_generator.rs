use case_document::{CaseStudyContent, NarrativeSection, SectionKind};
use case_forge::{ContentGenerator, GenerationInput};
use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

/// What the generator was handed for one call
#[derive(Debug, Clone)]
pub struct GeneratorCall {
    pub source_url: String,
    pub title: String,
    pub transcript: String,
}

#[derive(Clone)]
pub struct MockContentGenerator {
    pub agency: String,
    pub product: String,
    pub campaign: String,
    pub calls: Arc<Mutex<Vec<GeneratorCall>>>,
    pub fail_with: Option<String>,
    pub delay: Option<Duration>,
}

impl MockContentGenerator {
    pub fn new(agency: &str, product: &str, campaign: &str) -> Self {
        Self {
            agency: agency.to_string(),
            product: product.to_string(),
            campaign: campaign.to_string(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
            delay: None,
        }
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            agency: String::new(),
            product: String::new(),
            campaign: String::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: Some(msg.to_string()),
            delay: None,
        }
    }

    pub fn slow(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }
}

impl Default for MockContentGenerator {
    fn default() -> Self {
        Self::new("Acme Creative", "Widget", "Launch")
    }
}

impl ContentGenerator for MockContentGenerator {
    type Error = anyhow::Error;

    async fn generate(&self, input: GenerationInput<'_>) -> Result<CaseStudyContent, Self::Error> {
        self.calls.lock().unwrap().push(GeneratorCall {
            source_url: input.source_url.to_string(),
            title: input.metadata.title.clone(),
            transcript: input.transcript.to_string(),
        });
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(ref msg) = self.fail_with {
            return Err(anyhow::anyhow!("{}", msg));
        }

        let sections = SectionKind::ALL
            .into_iter()
            .map(|kind| NarrativeSection {
                kind,
                body: format!("{} for {}.", kind.heading(), input.metadata.title),
            })
            .collect();

        Ok(CaseStudyContent {
            source_url: input.source_url.to_string(),
            video: input.metadata.clone(),
            agency: self.agency.clone(),
            product: self.product.clone(),
            campaign: self.campaign.clone(),
            director: "Jane Doe".to_string(),
            production_company: "Mock Films".to_string(),
            year: "2024".to_string(),
            sections,
        })
    }
}
