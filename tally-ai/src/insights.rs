//! Freeform spending insights over the ledger.

use anyhow::Result;

use tally_core::{CategoryLists, Transaction};

use crate::client::{chat_complete, AiConfig, ChatTurn};

const INSIGHTS_SYSTEM: &str = "You are a personal finance assistant. Given a \
list of transactions and the user's category setup, point out notable \
spending patterns, category outliers, and one or two actionable suggestions. \
Answer in short plain-text paragraphs.";

/// How many of the most recent transactions go into the prompt.
const PROMPT_TRANSACTION_CAP: usize = 200;

/// Ask the model for a freeform analysis of the ledger.
pub async fn generate_insights(
    config: &AiConfig,
    transactions: &[Transaction],
    categories: &CategoryLists,
) -> Result<String> {
    let prompt = build_prompt(transactions, categories);
    chat_complete(config, INSIGHTS_SYSTEM, &[ChatTurn::user(prompt)]).await
}

fn build_prompt(transactions: &[Transaction], categories: &CategoryLists) -> String {
    let mut ordered: Vec<&Transaction> = transactions.iter().collect();
    ordered.sort_by_key(|tx| tx.date);
    let recent = &ordered[ordered.len().saturating_sub(PROMPT_TRANSACTION_CAP)..];

    let mut prompt = String::new();
    prompt.push_str(&format!(
        "Income categories: {}\nExpense categories: {}\nInvestment categories: {}\n\n",
        categories.income.join(", "),
        categories.expense.join(", "),
        categories.investment.join(", "),
    ));
    prompt.push_str(&format!(
        "Transactions ({} of {} total, oldest first):\n",
        recent.len(),
        transactions.len()
    ));
    for tx in recent {
        prompt.push_str(&format!(
            "{} {:+.2} {} ({})\n",
            tx.date,
            tx.amount,
            tx.category,
            tx.kind.as_str()
        ));
    }
    prompt
}
