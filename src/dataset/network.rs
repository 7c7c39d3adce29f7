use std::collections::{HashMap, HashSet};

use log::{info, warn};

use super::Dataset;
use super::connectivity::{ConnectivityIndex, canonical_link_id, canonical_pair};

#[derive(Clone, Debug)]
pub struct Author {
    pub id: String,
    pub field: Option<String>,
    pub degree: Option<u32>,
}

// `source` is the endpoint whose id sorts first; `id` is only a display label.
#[derive(Clone, Debug)]
pub struct Link {
    pub id: String,
    pub source: usize,
    pub target: usize,
    pub publications: Vec<String>,
}

impl Link {
    pub fn weight(&self) -> usize {
        self.publications.len()
    }

    pub fn touches(&self, index: usize) -> bool {
        self.source == index || self.target == index
    }
}

#[derive(Clone, Debug, Default)]
pub struct CollaborationNetwork {
    pub authors: Vec<Author>,
    pub links: Vec<Link>,
    pub connectivity: ConnectivityIndex,
    pub index_by_id: HashMap<String, usize>,
    pub unresolved: Vec<String>,
}

impl CollaborationNetwork {
    pub fn build(dataset: &Dataset) -> Self {
        let mut authors = dataset
            .authors
            .iter()
            .map(|record| Author {
                id: record.id.clone(),
                field: record.field.clone(),
                degree: None,
            })
            .collect::<Vec<_>>();

        let mut index_by_id = HashMap::with_capacity(authors.len());
        for (index, author) in authors.iter().enumerate() {
            index_by_id.insert(author.id.clone(), index);
        }

        let mut links: Vec<Link> = Vec::new();
        let mut link_by_pair: HashMap<(usize, usize), usize> = HashMap::new();
        let mut connectivity = ConnectivityIndex::default();
        let mut unresolved = Vec::new();
        let mut reported = HashSet::new();

        for publication in &dataset.publications {
            if publication.authors.len() < 2 {
                continue;
            }

            let mut listed = HashSet::with_capacity(publication.authors.len());
            let mut members = Vec::with_capacity(publication.authors.len());
            for author_id in &publication.authors {
                if !listed.insert(author_id.as_str()) {
                    continue;
                }

                match index_by_id.get(author_id) {
                    Some(&index) => members.push(index),
                    None => {
                        if reported.insert(author_id.clone()) {
                            warn!(
                                "publication {} references unknown author {author_id:?}; skipping its pairs",
                                publication.id
                            );
                            unresolved.push(author_id.clone());
                        }
                    }
                }
            }

            for (offset, &first) in members.iter().enumerate() {
                for &second in &members[offset + 1..] {
                    let (low, high) = canonical_pair(&authors[first].id, &authors[second].id);
                    let (source, target) = if low == authors[first].id.as_str() {
                        (first, second)
                    } else {
                        (second, first)
                    };
                    connectivity.mark(source, target);

                    if let Some(&existing) = link_by_pair.get(&(source, target)) {
                        links[existing].publications.push(publication.id.clone());
                        continue;
                    }

                    link_by_pair.insert((source, target), links.len());
                    links.push(Link {
                        id: canonical_link_id(low, high),
                        source,
                        target,
                        publications: vec![publication.id.clone()],
                    });
                }
            }
        }

        let mut degrees = vec![None::<u32>; authors.len()];
        for link in &links {
            let weight = degree_weight(link.weight());
            for endpoint in [link.source, link.target] {
                let degree = degrees[endpoint].get_or_insert(0);
                *degree = degree.saturating_add(weight);
            }
        }
        for (author, degree) in authors.iter_mut().zip(degrees) {
            author.degree = degree;
        }

        info!(
            "built collaboration network: {} authors, {} links, {} connected pairs",
            authors.len(),
            links.len(),
            connectivity.len()
        );

        Self {
            authors,
            links,
            connectivity,
            index_by_id,
            unresolved,
        }
    }

    pub fn author(&self, index: usize) -> Option<&Author> {
        self.authors.get(index)
    }

    pub fn link_counts(&self) -> Vec<usize> {
        let mut counts = vec![0; self.authors.len()];
        for link in &self.links {
            counts[link.source] += 1;
            counts[link.target] += 1;
        }
        counts
    }
}

fn degree_weight(weight: usize) -> u32 {
    u32::try_from(weight).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::super::{AuthorRecord, Publication};
    use super::*;

    fn dataset(authors: &[(&str, Option<&str>)], publications: &[(&str, &[&str])]) -> Dataset {
        Dataset {
            authors: authors
                .iter()
                .map(|(id, field)| AuthorRecord {
                    id: (*id).to_owned(),
                    field: field.map(str::to_owned),
                })
                .collect(),
            publications: publications
                .iter()
                .map(|(id, authors)| Publication {
                    id: (*id).to_owned(),
                    authors: authors.iter().map(|author| (*author).to_owned()).collect(),
                })
                .collect(),
        }
    }

    fn link<'a>(network: &'a CollaborationNetwork, id: &str) -> &'a Link {
        network
            .links
            .iter()
            .find(|link| link.id == id)
            .unwrap_or_else(|| panic!("missing link {id}"))
    }

    fn degree(network: &CollaborationNetwork, id: &str) -> Option<u32> {
        network.authors[network.index_by_id[id]].degree
    }

    #[test]
    fn aggregates_repeated_pairs_into_weighted_links() {
        let network = CollaborationNetwork::build(&dataset(
            &[("A", None), ("B", None), ("C", None)],
            &[("P1", &["A", "B"]), ("P2", &["A", "B"]), ("P3", &["B", "C"])],
        ));

        assert_eq!(network.links.len(), 2);
        assert_eq!(link(&network, "A-B").publications, vec!["P1", "P2"]);
        assert_eq!(link(&network, "B-C").publications, vec!["P3"]);

        assert_eq!(degree(&network, "A"), Some(2));
        assert_eq!(degree(&network, "B"), Some(3));
        assert_eq!(degree(&network, "C"), Some(1));

        let [a, b, c] = ["A", "B", "C"].map(|id| network.index_by_id[id]);
        assert!(!network.connectivity.is_connected(a, c));
        assert!(network.connectivity.is_connected(a, b));
        assert!(network.connectivity.is_connected(c, c));
    }

    #[test]
    fn single_author_publication_contributes_nothing() {
        let network = CollaborationNetwork::build(&dataset(
            &[("A", None), ("B", None)],
            &[("solo", &["A"]), ("empty", &[])],
        ));

        assert!(network.links.is_empty());
        assert_eq!(degree(&network, "A"), None);
        assert_eq!(network.connectivity.len(), 0);
    }

    #[test]
    fn produces_every_pair_of_a_publication() {
        let authors = ["D", "A", "C", "E", "B"];
        let network = CollaborationNetwork::build(&dataset(
            &authors.map(|id| (id, None)),
            &[("P", &authors)],
        ));

        let n = authors.len();
        assert_eq!(network.links.len(), n * (n - 1) / 2);
        let contributions: usize = network.links.iter().map(Link::weight).sum();
        assert_eq!(contributions, n * (n - 1) / 2);
    }

    #[test]
    fn author_order_does_not_change_link_set() {
        let authors = [("A", None), ("B", None), ("C", None), ("D", None)];
        let orders: [&[&str]; 3] = [
            &["A", "B", "C", "D"],
            &["D", "C", "B", "A"],
            &["C", "A", "D", "B"],
        ];

        let mut signatures = orders.iter().map(|order| {
            let network = CollaborationNetwork::build(&dataset(&authors, &[("P", *order)]));
            let mut signature = network
                .links
                .iter()
                .map(|link| {
                    (
                        link.id.clone(),
                        network.authors[link.source].id.clone(),
                        network.authors[link.target].id.clone(),
                        link.weight(),
                    )
                })
                .collect::<Vec<_>>();
            signature.sort();
            signature
        });

        let first = signatures.next().unwrap();
        for other in signatures {
            assert_eq!(first, other);
        }
        for (id, source, target, _) in &first {
            assert!(source < target);
            assert_eq!(id, &format!("{source}-{target}"));
        }
    }

    #[test]
    fn degree_is_sum_of_incident_weights() {
        let network = CollaborationNetwork::build(&dataset(
            &[("A", None), ("B", None), ("C", None), ("D", None)],
            &[
                ("P1", &["A", "B", "C"]),
                ("P2", &["C", "A"]),
                ("P3", &["B", "D"]),
                ("P4", &["D", "B"]),
            ],
        ));

        for (index, author) in network.authors.iter().enumerate() {
            let expected: usize = network
                .links
                .iter()
                .filter(|link| link.touches(index))
                .map(Link::weight)
                .sum();
            assert_eq!(author.degree.unwrap_or(0) as usize, expected, "{}", author.id);
        }
    }

    #[test]
    fn connectivity_matches_shared_publications() {
        let ids = ["A", "B", "C", "D", "E"];
        let publications: [(&str, &[&str]); 3] =
            [("P1", &["A", "B"]), ("P2", &["B", "C", "D"]), ("P3", &["E"])];
        let network =
            CollaborationNetwork::build(&dataset(&ids.map(|id| (id, None)), &publications));

        for first in &ids {
            for second in &ids {
                let (a, b) = (network.index_by_id[*first], network.index_by_id[*second]);
                let shared = first == second
                    || publications
                        .iter()
                        .any(|(_, authors)| authors.contains(first) && authors.contains(second));
                assert_eq!(
                    network.connectivity.is_connected(a, b),
                    shared,
                    "{first} / {second}"
                );
            }
        }
    }

    #[test]
    fn links_share_author_entities() {
        let network = CollaborationNetwork::build(&dataset(
            &[("A", None), ("B", None), ("C", None)],
            &[("P1", &["C", "A"]), ("P2", &["A", "B"])],
        ));

        let a = network.index_by_id["A"];
        let incident = network.links.iter().filter(|link| link.touches(a)).count();
        assert_eq!(incident, 2);
        assert_eq!(network.link_counts()[a], 2);
        assert_eq!(network.authors.len(), 3);
    }

    #[test]
    fn unknown_authors_are_dropped_from_pairing() {
        let network = CollaborationNetwork::build(&dataset(
            &[("A", None), ("B", None)],
            &[("P1", &["A", "Ghost", "B"]), ("P2", &["Ghost", "A"])],
        ));

        assert_eq!(network.unresolved, vec!["Ghost".to_owned()]);
        assert_eq!(network.authors.len(), 2);
        assert_eq!(network.links.len(), 1);
        assert_eq!(link(&network, "A-B").weight(), 1);
        assert_eq!(degree(&network, "A"), Some(1));
    }

    #[test]
    fn repeated_author_in_one_publication_is_counted_once() {
        let network = CollaborationNetwork::build(&dataset(
            &[("A", None), ("B", None)],
            &[("P1", &["A", "B", "A"])],
        ));

        assert_eq!(network.links.len(), 1);
        assert_eq!(link(&network, "A-B").weight(), 1);
    }

    #[test]
    fn hyphenated_ids_with_the_same_label_stay_separate_links() {
        let network = CollaborationNetwork::build(&dataset(
            &[
                ("Ana-Maria", None),
                ("Carlos", None),
                ("Ana", None),
                ("Maria-Carlos", None),
            ],
            &[("P1", &["Ana-Maria", "Carlos"]), ("P2", &["Ana", "Maria-Carlos"])],
        ));

        assert_eq!(network.links.len(), 2);
        for id in ["Ana-Maria", "Carlos", "Ana", "Maria-Carlos"] {
            assert_eq!(degree(&network, id), Some(1), "{id}");
        }

        let [ana_maria, carlos, ana, maria_carlos] =
            ["Ana-Maria", "Carlos", "Ana", "Maria-Carlos"].map(|id| network.index_by_id[id]);
        assert!(network.connectivity.is_connected(ana_maria, carlos));
        assert!(network.connectivity.is_connected(ana, maria_carlos));
        assert!(!network.connectivity.is_connected(ana_maria, maria_carlos));
        assert!(!network.connectivity.is_connected(ana, carlos));
    }

    #[test]
    fn oversized_weights_saturate_instead_of_wrapping() {
        assert_eq!(degree_weight(3), 3);
        assert_eq!(degree_weight(usize::MAX), u32::MAX);
    }
}
