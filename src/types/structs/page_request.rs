// A batch of URLs to be fetched next, in dequeue order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PageRequest {
    pub urls: Vec<String>,
}

impl PageRequest {
    pub fn with_capacity(n: usize) -> Self {
        Self {
            urls: Vec::with_capacity(n),
        }
    }

    pub fn add_url(&mut self, url: impl Into<String>) {
        self.urls.push(url.into());
    }

    pub fn n_urls(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}
