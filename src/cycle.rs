use crate::schema::{Field, Schema};
use ahash::{AHashMap, AHashSet};
use tracing::{debug, trace};

/// Decides whether descending into a message-typed field can lead back to a
/// type that is already being built, and remembers the loop it found.
///
/// Results are derived from the schema alone, so a detector stays valid across
/// failed input calls. Each field is searched at most once per detector.
pub struct CycleDetector<'s> {
    schema: &'s Schema,
    /// field full name -> message types forming the loop, in discovery order.
    circulated: AHashMap<String, Vec<String>>,
    /// Fields already searched without finding a loop back to their own type.
    acyclic: AHashSet<String>,
}

/// State of one search. `path` only grows: a type is appended when the
/// search first reaches it and is never visited twice, which bounds the walk
/// by the number of message types.
struct Search {
    path: Vec<String>,
    /// message type -> full name of the field through which the search reached it.
    introduced_by: AHashMap<String, String>,
}

impl<'s> CycleDetector<'s> {
    pub fn new(schema: &'s Schema) -> Self {
        Self {
            schema,
            circulated: AHashMap::new(),
            acyclic: AHashSet::new(),
        }
    }

    /// Returns true when entering `field`'s message type can revisit that type.
    ///
    /// Loops discovered along the way that close on some other type are
    /// recorded under the field that first reached the closing type, even when
    /// `field` itself turns out not to be circulated.
    pub fn is_circulated(&mut self, field: &Field) -> bool {
        let Some(root) = field.message_type() else {
            return false;
        };
        let key = field.full_name();
        if self.circulated.contains_key(&key) {
            return true;
        }
        if self.acyclic.contains(&key) {
            return false;
        }

        let mut search = Search {
            path: vec![root.to_string()],
            introduced_by: AHashMap::from_iter([(root.to_string(), key.clone())]),
        };
        let found = self.search(root, &mut search);
        if found {
            debug!(field = %key, path = ?self.circulated.get(&key), "field is circulated");
        } else {
            trace!(field = %key, "field is not circulated");
            self.acyclic.insert(key);
        }
        found
    }

    /// The loop recorded for a field, if any.
    pub fn circulated_path(&self, field_full_name: &str) -> Option<&[String]> {
        self.circulated.get(field_full_name).map(Vec::as_slice)
    }

    /// Every loop recorded so far, keyed by field full name.
    pub fn circulated_fields(&self) -> &AHashMap<String, Vec<String>> {
        &self.circulated
    }

    /// Visits `message`. Returns true once a loop closes on the root type.
    fn search(&mut self, message: &str, search: &mut Search) -> bool {
        let schema = self.schema;
        let Some(descriptor) = schema.message(message) else {
            return false;
        };
        let children: Vec<(&Field, &str)> = descriptor
            .fields()
            .iter()
            .filter_map(|f| f.message_type().map(|ty| (f, ty)))
            .collect();

        // All edges out of `message` are checked before any of them is followed.
        let mut closes_root = false;
        for (_, ty) in &children {
            let Some(pos) = search.path.iter().position(|p| p == *ty) else {
                continue;
            };
            let Some(introducer) = search.introduced_by.get(*ty) else {
                continue;
            };
            let cycle = search.path[pos..].to_vec();
            trace!(field = %introducer, cycle = ?cycle, "loop found");
            self.circulated.entry(introducer.clone()).or_insert(cycle);
            if pos == 0 {
                closes_root = true;
                break;
            }
        }
        if closes_root {
            return true;
        }

        let mut fresh = Vec::new();
        for (field, ty) in children {
            if search.path.iter().any(|p| p == ty) {
                continue;
            }
            search.path.push(ty.to_string());
            search
                .introduced_by
                .insert(ty.to_string(), field.full_name());
            fresh.push(ty);
        }

        fresh.into_iter().any(|ty| self.search(ty, search))
    }
}
