#[cfg(test)]
mod crawl;
