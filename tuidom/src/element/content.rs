#[derive(Debug, Clone, Default)]
pub enum Content {
    #[default]
    None,
    /// Text, one rendered row per `\n`-separated line.
    Text(String),
    Children(Vec<super::Element>),
}
