use super::*;

struct StaticSource;

impl BitmapSource for StaticSource {
    fn fetch(&self, source: &str) -> LaminaResult<Bitmap> {
        if source == "missing.png" {
            return Err(LaminaError::load(format!("no bytes for '{source}'")));
        }
        Ok(Bitmap {
            width: 2,
            height: 1,
            rgba8_premul: Arc::new(vec![0; 8]),
        })
    }
}

fn defs(entries: &[(&str, &str)]) -> Vec<ImageDef> {
    entries
        .iter()
        .map(|(name, src)| ImageDef {
            name: name.to_string(),
            src: src.to_string(),
            relative: BTreeMap::new(),
        })
        .collect()
}

#[test]
fn lookup_first_definition_wins() {
    let catalog = AssetCatalog::new(&defs(&[("a", "one.png"), ("a", "two.png")]));
    let asset = catalog.lookup("a").unwrap();
    assert_eq!(asset.source, "one.png");
}

#[test]
fn lookup_unknown_is_not_found() {
    let catalog = AssetCatalog::new(&defs(&[("a", "one.png")]));
    assert!(matches!(catalog.lookup("b"), Err(LaminaError::NotFound(_))));
}

#[test]
fn new_catalog_starts_unloaded() {
    let catalog = AssetCatalog::new(&defs(&[("a", "a.png")]));
    assert_eq!(catalog.len(), 1);
    assert!(!catalog.is_empty());
    assert!(catalog.lookup("a").unwrap().bitmap.is_none());
}

#[test]
fn load_all_attaches_bitmaps() {
    let mut catalog = AssetCatalog::new(&defs(&[("a", "a.png"), ("b", "b.png")]));
    catalog.load_all(&StaticSource).unwrap();
    assert!(catalog.lookup("a").unwrap().bitmap.is_some());
    assert!(catalog.lookup("b").unwrap().bitmap.is_some());
}

#[test]
fn load_all_failure_leaves_catalog_unloaded() {
    let mut catalog = AssetCatalog::new(&defs(&[("a", "a.png"), ("b", "missing.png")]));
    assert!(catalog.load_all(&StaticSource).is_err());
    assert!(catalog.lookup("a").unwrap().bitmap.is_none());
}
