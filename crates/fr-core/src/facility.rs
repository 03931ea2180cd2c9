//! Named facility positions (the `name → point` map a graph is built from).

use rustc_hash::FxHashMap;

use crate::{CoreError, CoreResult, FacilityId, GeoPoint};

/// One named facility.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Facility {
    pub id:  FacilityId,
    pub pos: GeoPoint,
}

/// An insertion-ordered set of facilities with unique names.
///
/// Lookup by name is O(1) through an `FxHashMap` index into the backing
/// `Vec`.  Insertion order is preserved for iteration but carries no
/// meaning for graph construction.
#[derive(Clone, Debug, Default)]
pub struct FacilitySet {
    facilities: Vec<Facility>,
    index:      FxHashMap<FacilityId, usize>,
}

impl FacilitySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(n: usize) -> Self {
        Self {
            facilities: Vec::with_capacity(n),
            index:      FxHashMap::with_capacity_and_hasher(n, Default::default()),
        }
    }

    /// Build a set from `(name, point)` records.
    ///
    /// Fails on the first repeated name with
    /// [`CoreError::DuplicateIdentifier`]; no partial set is returned.
    pub fn from_records<I, S>(records: I) -> CoreResult<Self>
    where
        I: IntoIterator<Item = (S, GeoPoint)>,
        S: AsRef<str>,
    {
        let records = records.into_iter();
        let mut set = Self::with_capacity(records.size_hint().0);
        for (name, pos) in records {
            set.insert(FacilityId::new(name)?, pos)?;
        }
        Ok(set)
    }

    /// Add a facility.  A name that is already present is rejected and the
    /// existing entry is left untouched.
    pub fn insert(&mut self, id: FacilityId, pos: GeoPoint) -> CoreResult<()> {
        if self.index.contains_key(&id) {
            return Err(CoreError::DuplicateIdentifier(id));
        }
        self.index.insert(id.clone(), self.facilities.len());
        self.facilities.push(Facility { id, pos });
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Facility> {
        self.index.get(name).map(|&i| &self.facilities[i])
    }

    /// Position of `name`, if present.
    pub fn position(&self, name: &str) -> Option<GeoPoint> {
        self.get(name).map(|f| f.pos)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Facility> {
        self.facilities.iter()
    }

    pub fn len(&self) -> usize {
        self.facilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facilities.is_empty()
    }
}

impl<'a> IntoIterator for &'a FacilitySet {
    type Item = &'a Facility;
    type IntoIter = std::slice::Iter<'a, Facility>;

    fn into_iter(self) -> Self::IntoIter {
        self.facilities.iter()
    }
}
