use anyhow::Context as _;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ActiveValue::Set, ColumnTrait, DatabaseConnection,
    EntityTrait, QueryFilter, QueryOrder, sea_query::Expr,
};

use mfa_schema::mfatokens;

use crate::domain::repository::MfaTokenRepository;
use crate::domain::types::{MfaToken, NewMfaToken, UserId};
use crate::error::MfaServiceError;

#[derive(Clone)]
pub struct DbMfaTokenRepository {
    pub db: DatabaseConnection,
}

impl MfaTokenRepository for DbMfaTokenRepository {
    async fn insert(&self, token: &NewMfaToken) -> Result<MfaToken, MfaServiceError> {
        let model = mfatokens::ActiveModel {
            id: NotSet,
            user_id: Set(token.user_id.0),
            token: Set(token.token.as_str().to_owned()),
            expiry: Set(token.expiry),
            is_used: Set(false),
        }
        .insert(&self.db)
        .await
        .context("insert mfa token")?;
        Ok(mfa_token_from_model(model))
    }

    async fn find_active(&self, user_id: UserId) -> Result<Option<MfaToken>, MfaServiceError> {
        let model = mfatokens::Entity::find()
            .filter(mfatokens::Column::UserId.eq(user_id.0))
            .filter(mfatokens::Column::IsUsed.eq(false))
            .order_by_desc(mfatokens::Column::Id)
            .one(&self.db)
            .await
            .context("find active mfa token")?;
        Ok(model.map(mfa_token_from_model))
    }

    async fn consume(&self, id: i64) -> Result<bool, MfaServiceError> {
        let result = mfatokens::Entity::update_many()
            .col_expr(mfatokens::Column::IsUsed, Expr::value(true))
            .filter(mfatokens::Column::Id.eq(id))
            .filter(mfatokens::Column::IsUsed.eq(false))
            .exec(&self.db)
            .await
            .context("consume mfa token")?;
        Ok(result.rows_affected == 1)
    }
}

fn mfa_token_from_model(model: mfatokens::Model) -> MfaToken {
    MfaToken {
        id: model.id,
        user_id: UserId(model.user_id),
        token: model.token,
        expiry: model.expiry,
        is_used: model.is_used,
    }
}
