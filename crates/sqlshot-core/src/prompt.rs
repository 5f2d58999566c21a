use crate::model::Strategy;

/// Instruction sentence appended to every strategy prefix.
pub const COMMON_SQL_REQUEST: &str = "Write me a sqlite select statement that answers the question. Only respond with sqlite syntax. If there is an error do not explain it.";

/// The fixed question list. Order matters: reports list questions in this
/// order for every strategy.
pub const QUESTIONS: [&str; 9] = [
    "Which customers have multiple appointments?",
    "Which stylists have served the most customers?",
    "Which service has been booked the most?",
    "Which customers have spent the most money on appointments?",
    "Which are the most expensive services offered?",
    "Who are the stylists hired most recently?",
    "What are the total earnings of each stylist based on completed appointments?",
    "Which customers have upcoming appointments?",
    "Who has been a customer the longest?",
];

const EXAMPLE_QUERY_1: &str = "\
-- Example Query 1: Which customers have upcoming appointments?
SELECT c.customer_id, c.first_name, c.last_name
FROM customer c
JOIN appointment a ON c.customer_id = a.customer_id
WHERE a.appointment_date > CURRENT_DATE;";

const EXAMPLE_QUERY_2: &str = "\
-- Example Query 2: What is the total number of appointments for each customer?
SELECT c.customer_id, c.first_name, c.last_name, COUNT(a.appointment_id) as total_appointments
FROM customer c
JOIN appointment a ON c.customer_id = a.customer_id
GROUP BY c.customer_id, c.first_name, c.last_name;";

const EXAMPLE_QUERY_3: &str = "\
-- Example Query 3: Which customers have appointments next week?
SELECT c.customer_id, c.first_name, c.last_name
FROM customer c
JOIN appointment a ON c.customer_id = a.customer_id
WHERE a.appointment_date BETWEEN CURRENT_DATE AND CURRENT_DATE + INTERVAL '7 days';";

/// The three built-in strategies, distinguished by how many worked example
/// queries precede the instruction. The schema script itself is the first
/// part of every prefix so the model sees the tables it is writing against.
pub fn builtin_strategies(schema_script: &str) -> Vec<Strategy> {
    vec![
        Strategy {
            name: "zero_shot".to_string(),
            prompt_prefix: format!("{schema_script}{COMMON_SQL_REQUEST}"),
        },
        Strategy {
            name: "double_shot".to_string(),
            prompt_prefix: format!(
                "{schema_script}\n{EXAMPLE_QUERY_1}\n\n{EXAMPLE_QUERY_2}\n\n{COMMON_SQL_REQUEST}"
            ),
        },
        Strategy {
            name: "multi_shot".to_string(),
            prompt_prefix: format!(
                "{schema_script}\n{EXAMPLE_QUERY_1}\n\n{EXAMPLE_QUERY_2}\n\n{EXAMPLE_QUERY_3}\n\n{COMMON_SQL_REQUEST}"
            ),
        },
    ]
}

pub fn question_prompt(strategy: &Strategy, question: &str) -> String {
    format!("{} {}", strategy.prompt_prefix, question)
}

/// Second-call prompt: asks the model to rephrase the raw rows as prose.
pub fn friendly_prompt(question: &str, raw_result: &str) -> String {
    format!(
        "I asked the question '{question}' and the response was '{raw_result}'. \
         Please, give a concise response in a more friendly way."
    )
}
