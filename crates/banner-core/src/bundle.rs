//! Files that make up one banner bundle

/// Every archive holds exactly these files, flat at its root
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BundleFile {
    Index,
    Normal,
    Thermal,
    Camera,
}

impl BundleFile {
    pub const ALL: [BundleFile; 4] = [
        BundleFile::Index,
        BundleFile::Normal,
        BundleFile::Thermal,
        BundleFile::Camera,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            BundleFile::Index => "index.html",
            BundleFile::Normal => "normal.png",
            BundleFile::Thermal => "thermal.png",
            BundleFile::Camera => "camara.png",
        }
    }

    /// Image files referenced from index.html
    pub fn images() -> [BundleFile; 3] {
        [BundleFile::Normal, BundleFile::Thermal, BundleFile::Camera]
    }

    /// Sorted file names, the order entries appear in an archive
    pub fn sorted_names() -> Vec<&'static str> {
        let mut names: Vec<_> = Self::ALL.iter().map(|f| f.file_name()).collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorted_names() {
        assert_eq!(
            BundleFile::sorted_names(),
            vec!["camara.png", "index.html", "normal.png", "thermal.png"]
        );
    }
}
