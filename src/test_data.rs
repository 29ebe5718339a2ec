#[cfg(test)]
pub const HELLO_WORLD_POST: &str = r#"+++
title = "Hello World"
date = "2023-05-01T12:00:00Z"
draft = false
+++

Some content
"#;

#[cfg(test)]
pub const DRAFT_POST: &str = "+++
title = \"Quotes \\\"inside\\\" \\\\ and tabs\"
date = 2019-07-15 20:30:00 +0200 CEST
draft = true
+++

Line one

\tLine \"two\"

";

#[cfg(test)]
pub const NO_DATE_POST: &str = r#"+++
title = "Forgot the date"
+++

Still has a body
"#;
