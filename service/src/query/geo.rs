//! [`Query`] resolving geographic catch-all paths.

use common::{
    operations::{By, Select},
    Slug,
};
use tracerr::Traced;

use crate::{
    geo::Path,
    infra::{api, Api},
    read, Query, Service,
};

/// [`Query`] resolving raw geographic path segments into the page they
/// address.
///
/// A 2-segment path is ambiguous between a settlement catalog and a listing
/// reached by its district-level URL: the listing interpretation is probed
/// first, and only a listing actually belonging to the district counts.
/// Either way, a listing is served only when the location chain stored for
/// it matches the chain the URL claims.
#[derive(Clone, Debug)]
pub struct Resolve {
    /// Raw path segments, in order.
    pub segments: Vec<String>,
}

/// Page addressed by a geographic path.
#[derive(Clone, Debug)]
pub enum Page {
    /// Catalog page of the resolved location chain.
    Catalog(read::location::Resolved),

    /// Listing page.
    Listing(read::listing::Detail),
}

impl<A, S> Query<Resolve> for Service<A, S>
where
    A: Api<
            Select<By<Option<read::listing::Detail>, Slug>>,
            Ok = Option<read::listing::Detail>,
            Err = Traced<api::Error>,
        > + Api<
            Select<
                By<Option<read::location::Resolved>, read::location::Selector>,
            >,
            Ok = Option<read::location::Resolved>,
            Err = Traced<api::Error>,
        >,
{
    type Ok = Option<Page>;
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        Resolve { segments }: Resolve,
    ) -> Result<Self::Ok, Self::Err> {
        let Some(path) = Path::classify(&segments) else {
            return Ok(None);
        };

        match path {
            Path::District(district) => {
                let resolved = self
                    .api()
                    .execute(Select(
                        By::<Option<read::location::Resolved>, _>::new(
                            read::location::Selector {
                                district,
                                settlement: None,
                            },
                        ),
                    ))
                    .await
                    .map_err(tracerr::wrap!())?;
                Ok(resolved.map(Page::Catalog))
            }
            Path::Ambiguous { district, tail } => {
                let listing = self
                    .api()
                    .execute(Select(
                        By::<Option<read::listing::Detail>, _>::new(
                            tail.clone(),
                        ),
                    ))
                    .await
                    .map_err(tracerr::wrap!())?;
                if let Some(detail) = listing {
                    if detail.location.district.slug == district {
                        return Ok(Some(Page::Listing(detail)));
                    }
                }

                let resolved = self
                    .api()
                    .execute(Select(
                        By::<Option<read::location::Resolved>, _>::new(
                            read::location::Selector {
                                district,
                                settlement: Some(tail),
                            },
                        ),
                    ))
                    .await
                    .map_err(tracerr::wrap!())?;
                Ok(resolved.map(Page::Catalog))
            }
            Path::Listing {
                district,
                settlement,
                listing,
            } => {
                let detail = self
                    .api()
                    .execute(Select(
                        By::<Option<read::listing::Detail>, _>::new(listing),
                    ))
                    .await
                    .map_err(tracerr::wrap!())?;
                Ok(detail
                    .filter(|d| {
                        d.location.district.slug == district
                            && d.location.settlement.as_ref().map(|s| &s.slug)
                                == Some(&settlement)
                    })
                    .map(Page::Listing))
            }
        }
    }
}

#[cfg(test)]
mod spec {
    use std::collections::HashMap;

    use common::{
        operations::{By, Select},
        DateTime, Slug,
    };
    use tracerr::Traced;

    use crate::{
        domain::user::session,
        infra::{api, Api},
        read::{self, settings::Settings},
        Config, Query as _, Service,
    };

    use super::{Page, Resolve};

    /// In-memory stand-in for the catalog API.
    #[derive(Clone, Debug, Default)]
    struct Gateway {
        listings: HashMap<Slug, read::listing::Detail>,
        locations: HashMap<read::location::Selector, read::location::Resolved>,
    }

    impl Api<Select<By<Option<read::listing::Detail>, Slug>>> for Gateway {
        type Ok = Option<read::listing::Detail>;
        type Err = Traced<api::Error>;

        async fn execute(
            &self,
            Select(by): Select<By<Option<read::listing::Detail>, Slug>>,
        ) -> Result<Self::Ok, Self::Err> {
            Ok(self.listings.get(&by.into_inner()).cloned())
        }
    }

    impl
        Api<
            Select<
                By<Option<read::location::Resolved>, read::location::Selector>,
            >,
        > for Gateway
    {
        type Ok = Option<read::location::Resolved>;
        type Err = Traced<api::Error>;

        async fn execute(
            &self,
            Select(by): Select<
                By<Option<read::location::Resolved>, read::location::Selector>,
            >,
        ) -> Result<Self::Ok, Self::Err> {
            Ok(self.locations.get(&by.into_inner()).cloned())
        }
    }

    impl Api<Select<By<Settings, ()>>> for Gateway {
        type Ok = Settings;
        type Err = Traced<api::Error>;

        async fn execute(
            &self,
            Select(_): Select<By<Settings, ()>>,
        ) -> Result<Self::Ok, Self::Err> {
            Ok(Settings::default())
        }
    }

    /// Stand-in for the suggestions gateway, never reached by these tests.
    #[derive(Clone, Copy, Debug)]
    struct Quiet;

    fn slug(v: &str) -> Slug {
        Slug::new(v).unwrap()
    }

    fn location(id: i64, name: &str, slug: &str) -> read::location::Location {
        read::location::Location {
            id: id.into(),
            name: name.into(),
            slug: self::slug(slug),
        }
    }

    fn detail(
        slug: &str,
        district: read::location::Location,
        settlement: Option<read::location::Location>,
    ) -> read::listing::Detail {
        read::listing::Detail {
            id: 1.into(),
            slug: self::slug(slug),
            title: "Участок у моря".into(),
            description: String::new(),
            price: "1500000".parse().unwrap(),
            area: "800".parse().unwrap(),
            land_use: None,
            location: read::listing::Location {
                district,
                settlement,
            },
            cadastral_number: None,
            point: None,
            images: Vec::new(),
            published_at: DateTime::now().coerce(),
        }
    }

    fn gateway() -> Gateway {
        let zelenogradsk = location(1, "Зеленоградский округ", "zelenogradsk");
        let guryevsk = location(2, "Гурьевский округ", "guryevsk");
        let morskoe = location(11, "Морское", "morskoe");
        let kamenka = location(12, "Каменка", "kamenka");

        let mut g = Gateway::default();
        _ = g.locations.insert(
            read::location::Selector {
                district: slug("zelenogradsk"),
                settlement: None,
            },
            read::location::Resolved {
                district: zelenogradsk.clone(),
                settlement: None,
            },
        );
        _ = g.locations.insert(
            read::location::Selector {
                district: slug("zelenogradsk"),
                settlement: Some(slug("morskoe")),
            },
            read::location::Resolved {
                district: zelenogradsk.clone(),
                settlement: Some(morskoe.clone()),
            },
        );
        _ = g.locations.insert(
            read::location::Selector {
                district: slug("zelenogradsk"),
                settlement: Some(slug("kamenka")),
            },
            read::location::Resolved {
                district: zelenogradsk.clone(),
                settlement: Some(kamenka),
            },
        );
        _ = g.listings.insert(
            slug("primorskiy-uchastok"),
            detail(
                "primorskiy-uchastok",
                zelenogradsk.clone(),
                Some(morskoe),
            ),
        );
        _ = g.listings.insert(
            slug("kamenka"),
            detail("kamenka", zelenogradsk, None),
        );
        _ = g.listings.insert(
            slug("stepnoy-uchastok"),
            detail("stepnoy-uchastok", guryevsk, None),
        );
        g
    }

    fn service(gateway: Gateway) -> Service<Gateway, Quiet> {
        let path = std::env::temp_dir()
            .join(format!("session-{}.json", uuid::Uuid::new_v4()));
        Service::new(
            Config::default(),
            gateway,
            Quiet,
            session::Store::open(path),
        )
        .0
    }

    async fn resolve(svc: &Service<Gateway, Quiet>, path: &[&str]) -> Option<Page> {
        svc.execute(Resolve {
            segments: path.iter().map(ToString::to_string).collect(),
        })
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn single_segment_names_a_district_catalog() {
        let svc = service(gateway());

        match resolve(&svc, &["zelenogradsk"]).await {
            Some(Page::Catalog(resolved)) => {
                assert_eq!(resolved.district.slug, slug("zelenogradsk"));
                assert!(resolved.settlement.is_none());
            }
            other => panic!("unexpected: {other:?}"),
        }

        assert!(resolve(&svc, &["pionersk"]).await.is_none());
    }

    #[tokio::test]
    async fn two_segments_probe_the_listing_first() {
        let svc = service(gateway());

        match resolve(&svc, &["zelenogradsk", "primorskiy-uchastok"]).await {
            Some(Page::Listing(d)) => {
                assert_eq!(d.slug, slug("primorskiy-uchastok"));
            }
            other => panic!("unexpected: {other:?}"),
        }

        // A slug naming both a settlement and a listing goes to the listing.
        match resolve(&svc, &["zelenogradsk", "kamenka"]).await {
            Some(Page::Listing(d)) => assert_eq!(d.slug, slug("kamenka")),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[tokio::test]
    async fn two_segments_fall_back_to_the_settlement() {
        let svc = service(gateway());

        match resolve(&svc, &["zelenogradsk", "morskoe"]).await {
            Some(Page::Catalog(resolved)) => {
                assert_eq!(
                    resolved.settlement.map(|s| s.slug),
                    Some(slug("morskoe")),
                );
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[tokio::test]
    async fn listing_of_another_district_does_not_count() {
        let svc = service(gateway());

        assert!(resolve(&svc, &["zelenogradsk", "stepnoy-uchastok"])
            .await
            .is_none());
    }

    #[tokio::test]
    async fn three_segments_require_the_full_chain() {
        let svc = service(gateway());

        match resolve(&svc, &["zelenogradsk", "morskoe", "primorskiy-uchastok"])
            .await
        {
            Some(Page::Listing(d)) => {
                assert_eq!(d.slug, slug("primorskiy-uchastok"));
            }
            other => panic!("unexpected: {other:?}"),
        }

        assert!(resolve(
            &svc,
            &["guryevsk", "morskoe", "primorskiy-uchastok"],
        )
        .await
        .is_none());
        assert!(resolve(
            &svc,
            &["zelenogradsk", "zheleznodorozhnyy", "primorskiy-uchastok"],
        )
        .await
        .is_none());
    }

    #[tokio::test]
    async fn unroutable_paths_resolve_to_nothing() {
        let svc = service(gateway());

        assert!(resolve(&svc, &["about"]).await.is_none());
        assert!(resolve(&svc, &[]).await.is_none());
        assert!(resolve(&svc, &["zelenogradsk", "a", "b", "c"])
            .await
            .is_none());
    }
}
