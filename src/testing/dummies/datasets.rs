use crate::core::{Dataset, Sample};

pub fn labeled(pairs: &[(&str, &str)]) -> Dataset<String, String> {
    pairs
        .iter()
        .map(|(i, o)| Sample::new(i.to_string(), o.to_string()))
        .collect()
}

/// `"1"..="n"` labeled `odd`/`even`, annotated with both classes.
pub fn parity(n: usize) -> Dataset<String, String> {
    (1..=n)
        .map(|i| {
            let label = if i % 2 == 0 { "even" } else { "odd" };
            Sample::new(i.to_string(), label.to_string())
        })
        .collect::<Dataset<_, _>>()
        .with_all_classes(["odd", "even"])
}
