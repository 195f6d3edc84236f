//! Repository for the `leads` table, including conversion.

use atrium_core::types::DbId;
use serde_json::json;
use sqlx::PgPool;

use crate::models::account::Account;
use crate::models::contact::Contact;
use crate::models::lead::{ConvertLeadRequest, Lead, LeadConversion, LEAD_STATUS_CONVERTED};
use crate::models::opportunity::Opportunity;

const LEAD_COLUMNS: &str = "\
    id, tenant_id, first_name, last_name, email, company, status, \
    converted_account_id, converted_contact_id, converted_opportunity_id, \
    created_at, updated_at";

const ACCOUNT_COLUMNS: &str = "\
    id, tenant_id, name, domain, industry, created_at, updated_at";

const CONTACT_COLUMNS: &str = "\
    id, tenant_id, account_id, first_name, last_name, email, phone, title, \
    created_at, updated_at";

const OPPORTUNITY_COLUMNS: &str = "\
    id, tenant_id, account_id, contact_id, name, stage, amount, close_date, \
    created_at, updated_at";

/// Lead lookups and the convert transaction.
pub struct LeadRepo;

impl LeadRepo {
    pub async fn find_by_id(
        pool: &PgPool,
        tenant_id: DbId,
        id: DbId,
    ) -> Result<Option<Lead>, sqlx::Error> {
        let query = format!("SELECT {LEAD_COLUMNS} FROM leads WHERE tenant_id = $1 AND id = $2");
        sqlx::query_as::<_, Lead>(&query)
            .bind(tenant_id)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Convert a lead into an account + contact (+ optional opportunity)
    /// in one transaction, mark the lead converted, and log a
    /// `stage_change` activity against it.
    ///
    /// Returns `Ok(None)` when the lead does not exist or was converted by
    /// a concurrent request; the caller distinguishes 404 from 409 by
    /// re-reading the lead.
    pub async fn convert(
        pool: &PgPool,
        tenant_id: DbId,
        lead_id: DbId,
        req: &ConvertLeadRequest,
        actor: Option<DbId>,
    ) -> Result<Option<LeadConversion>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        // Lock the lead row for the duration of the conversion.
        let query =
            format!("SELECT {LEAD_COLUMNS} FROM leads WHERE tenant_id = $1 AND id = $2 FOR UPDATE");
        let lead = sqlx::query_as::<_, Lead>(&query)
            .bind(tenant_id)
            .bind(lead_id)
            .fetch_optional(&mut *tx)
            .await?;

        let lead = match lead {
            Some(lead) if !lead.is_converted() => lead,
            _ => return Ok(None),
        };

        let account_name = req
            .account_name
            .clone()
            .or_else(|| lead.company.clone())
            .unwrap_or_else(|| format!("{} {}", lead.first_name, lead.last_name));

        let query = format!(
            "INSERT INTO accounts (tenant_id, name) VALUES ($1, $2) RETURNING {ACCOUNT_COLUMNS}"
        );
        let account = sqlx::query_as::<_, Account>(&query)
            .bind(tenant_id)
            .bind(&account_name)
            .fetch_one(&mut *tx)
            .await?;

        let query = format!(
            "INSERT INTO contacts (tenant_id, account_id, first_name, last_name, email) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {CONTACT_COLUMNS}"
        );
        let contact = sqlx::query_as::<_, Contact>(&query)
            .bind(tenant_id)
            .bind(account.id)
            .bind(&lead.first_name)
            .bind(&lead.last_name)
            .bind(lead.email.as_deref())
            .fetch_one(&mut *tx)
            .await?;

        let opportunity = match &req.opportunity_name {
            Some(name) => {
                let query = format!(
                    "INSERT INTO opportunities (tenant_id, account_id, contact_id, name, amount) \
                     VALUES ($1, $2, $3, $4, $5) RETURNING {OPPORTUNITY_COLUMNS}"
                );
                Some(
                    sqlx::query_as::<_, Opportunity>(&query)
                        .bind(tenant_id)
                        .bind(account.id)
                        .bind(contact.id)
                        .bind(name)
                        .bind(req.amount)
                        .fetch_one(&mut *tx)
                        .await?,
                )
            }
            None => None,
        };

        let query = format!(
            "UPDATE leads SET status = $3, converted_account_id = $4, \
                 converted_contact_id = $5, converted_opportunity_id = $6, \
                 updated_at = now() \
             WHERE tenant_id = $1 AND id = $2 RETURNING {LEAD_COLUMNS}"
        );
        let converted = sqlx::query_as::<_, Lead>(&query)
            .bind(tenant_id)
            .bind(lead_id)
            .bind(LEAD_STATUS_CONVERTED)
            .bind(account.id)
            .bind(contact.id)
            .bind(opportunity.as_ref().map(|o| o.id))
            .fetch_one(&mut *tx)
            .await?;

        // Fields match the stage_change payload schema.
        let payload = json!({
            "fromStage": lead.status,
            "toStage": LEAD_STATUS_CONVERTED,
        });
        sqlx::query(
            "INSERT INTO activities \
                 (tenant_id, entity_type, entity_id, activity_type, payload, created_by) \
             VALUES ($1, 'lead', $2, 'stage_change', $3, $4)",
        )
        .bind(tenant_id)
        .bind(lead_id)
        .bind(&payload)
        .bind(actor)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(lead_id, account_id = account.id, "Lead converted");

        Ok(Some(LeadConversion {
            lead: converted,
            account,
            contact,
            opportunity,
        }))
    }
}
