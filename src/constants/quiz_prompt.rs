use crate::{
    models::domain::question::{OPTIONS_PER_QUESTION, QUESTIONS_PER_BATCH},
    services::generator::PromptContext,
};

pub const QUIZ_TOPICS: &[&str] = &[
    "what OpenGradient is",
    "verifiable AI",
    "TEE execution",
    "decentralized inference",
    "OG token",
    "Model Hub",
    "MemSync",
    "Digital Twins",
    "zkML",
    "on-chain AI",
    "Base Sepolia",
    "OpenGradient SDK",
    "BitQuant",
    "x402 protocol",
    "OpenGradient network architecture",
];

const EXAMPLE_QUESTION: &str = r#"[
  {
    "question": "What is OpenGradient?",
    "options": ["A crypto exchange", "A decentralized AI network", "A wallet", "A game"],
    "answer": 1
  }
]"#;

pub fn render_quiz_prompt(context: &PromptContext) -> String {
    format!(
        "Generate {count} multiple choice questions about OpenGradient.
Use a random seed: {seed}
Request time: {requested_at}

IMPORTANT RULES:
- Make every quiz completely different from previous ones
- Every question has exactly {options} options
- Randomly vary which option (A, B, C or D) is the correct answer; do NOT always make the correct answer option A
- Mix easy and medium difficulty questions

Topics to randomly pick from: {topics}.

Return ONLY a JSON array, no other text, like this:
{example}
answer is the index (0,1,2,3) of the correct option. Vary the answer index across questions.",
        count = QUESTIONS_PER_BATCH,
        seed = context.seed,
        requested_at = context.requested_at.to_rfc3339(),
        options = OPTIONS_PER_QUESTION,
        topics = QUIZ_TOPICS.join(", "),
        example = EXAMPLE_QUESTION,
    )
}
