/// Something that can offer a finished file to other apps.
pub trait ShareTarget {
    fn share(&mut self, path: &std::path::Path, mime: &str);
}

/// Headless share target: records and logs what would have been shared.
#[derive(Default, Debug)]
pub struct LogShare {
    pub shared: Vec<std::path::PathBuf>,
}
impl ShareTarget for LogShare {
    fn share(&mut self, path: &std::path::Path, mime: &str) {
        log::info!("share {} as {mime}", path.display());
        self.shared.push(path.to_owned());
    }
}
