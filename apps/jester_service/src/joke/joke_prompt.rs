pub struct JokePrompt;

impl JokePrompt {
    /// Few-shot prompt: seven fixed topic/joke pairs, then `topic` with the
    /// joke left open for the generator.
    pub fn get_prompt(topic: &str) -> String {
        format!(
            r#"The following is a list of the funniest one line jokes ever created.

TOPIC: Work
JOKE: Most people are shocked when they find out how bad I am as an electrician.

TOPIC: Science
JOKE: Never trust atoms; they make up everything.

TOPIC: Driving
JOKE: My son had his driver's test today. He got 8 out of 10. The other 2 guys jumped clear.

TOPIC: Health
JOKE: I have an inferiority complex but it's not a very good one.

TOPIC: Animals
JOKE: At what age is it appropriate to tell my dog that he's adopted?

TOPIC: Love
JOKE: Never laugh at your wife's choices: your one of them.

TOPIC: Food
JOKE: Why do the French eat snails? They don't like fast food.

TOPIC: {}
JOKE:"#,
            topic
        )
    }
}
