//! [`Query`] collection related to settlement suggestions.

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    domain::settlement,
    infra::{hints, Hints},
    Query, Service,
};

/// [`Query`] of settlement [`Suggestion`]s matching a search
/// [`settlement::Query`].
///
/// [`Suggestion`]: settlement::Suggestion
#[derive(Clone, Debug)]
pub struct Settlements(pub settlement::Query);

impl<A, S> Query<Settlements> for Service<A, S>
where
    S: Hints<
        Select<By<Vec<settlement::Suggestion>, settlement::Query>>,
        Ok = Vec<settlement::Suggestion>,
        Err = Traced<hints::Error>,
    >,
{
    type Ok = Vec<settlement::Suggestion>;
    type Err = Traced<hints::Error>;

    async fn execute(
        &self,
        Settlements(query): Settlements,
    ) -> Result<Self::Ok, Self::Err> {
        self.suggest()
            .execute(Select(By::new(query)))
            .await
            .map_err(tracerr::wrap!())
    }
}
