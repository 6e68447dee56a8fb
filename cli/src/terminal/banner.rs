use colored::*;

use crate::terminal::print;

const BANNER: &str = r#"
                 /      \
              \  \  ,,  /  /
               '-.`\()/`.-'
              .--_'(  )'_--.
             / /` /`""`\ `\ \
              |  |  ><  |  |
              \  \      /  /
                  '.__.'
"#;

pub fn print() {
    print::print(&format!("{}", BANNER.bright_black()));
}
