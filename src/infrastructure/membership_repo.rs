use diesel::prelude::*;
use diesel::result::DatabaseErrorKind;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::catalog::ShopSummary;
use crate::domain::errors::DomainError;
use crate::domain::membership::{MemberProfile, MemberRoster, MembershipView};
use crate::domain::ports::MembershipRepository;
use crate::schema::{colleges, memberships, officers, profiles, programs, shops};

use super::ensure_officer;
use super::models::{MembershipRow, NewMembershipRow, ProfileRow, ShopRow};

pub struct DieselMembershipRepository {
    pool: DbPool,
}

impl DieselMembershipRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn membership_view(row: MembershipRow) -> MembershipView {
    MembershipView {
        id: row.id,
        shop_id: row.shop_id,
        email: row.email,
        user_id: row.user_id,
        created_at: row.created_at,
    }
}

impl MembershipRepository for DieselMembershipRepository {
    fn shops_for_member(
        &self,
        user_id: Uuid,
        email: &str,
    ) -> Result<Vec<ShopSummary>, DomainError> {
        let mut conn = self.pool.get()?;

        let rows: Vec<ShopRow> = memberships::table
            .inner_join(shops::table)
            .filter(
                memberships::user_id
                    .eq(user_id)
                    .or(memberships::email.eq(email)),
            )
            .order(shops::acronym.asc())
            .select(ShopRow::as_select())
            .distinct()
            .load(&mut conn)?;

        Ok(rows.into_iter().map(ShopSummary::from).collect())
    }

    fn managed_shops(&self, user_id: Uuid) -> Result<Vec<ShopSummary>, DomainError> {
        let mut conn = self.pool.get()?;

        let rows: Vec<ShopRow> = officers::table
            .inner_join(shops::table)
            .filter(officers::user_id.eq(user_id))
            .order(shops::acronym.asc())
            .select(ShopRow::as_select())
            .load(&mut conn)?;

        Ok(rows.into_iter().map(ShopSummary::from).collect())
    }

    fn roster(&self, actor: Uuid, shop_id: Uuid) -> Result<MemberRoster, DomainError> {
        let mut conn = self.pool.get()?;
        ensure_officer(&mut conn, actor, shop_id)?;

        let invited: Vec<String> = memberships::table
            .filter(memberships::shop_id.eq(shop_id))
            .order(memberships::created_at.asc())
            .select(memberships::email)
            .load(&mut conn)?;

        // Registration is keyed on email: an invite counts as registered as
        // soon as a profile with that email exists, linked or not.
        let rows: Vec<(ProfileRow, Option<String>, Option<String>)> = profiles::table
            .left_join(colleges::table)
            .left_join(programs::table)
            .filter(profiles::email.eq_any(&invited))
            .order(profiles::last_name.asc())
            .select((
                ProfileRow::as_select(),
                colleges::name.nullable(),
                programs::name.nullable(),
            ))
            .load(&mut conn)?;

        let members: Vec<MemberProfile> = rows
            .into_iter()
            .map(|(profile, college, program)| MemberProfile {
                user_id: profile.id,
                student_number: profile.student_number,
                first_name: profile.first_name,
                last_name: profile.last_name,
                email: profile.email,
                contact_number: profile.contact_number,
                college,
                program,
                year: profile.year,
                section: profile.section,
            })
            .collect();

        let registered: std::collections::HashSet<&str> =
            members.iter().map(|m| m.email.as_str()).collect();
        let unregistered_emails = invited
            .into_iter()
            .filter(|email| !registered.contains(email.as_str()))
            .collect();

        Ok(MemberRoster {
            members,
            unregistered_emails,
        })
    }

    fn add_member(
        &self,
        actor: Uuid,
        shop_id: Uuid,
        email: &str,
    ) -> Result<MembershipView, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            ensure_officer(conn, actor, shop_id)?;

            // Link the profile right away when the invited email is already
            // registered.
            let user_id: Option<Uuid> = profiles::table
                .filter(profiles::email.eq(email))
                .select(profiles::id)
                .first(conn)
                .optional()?;

            let id = Uuid::new_v4();
            let inserted = diesel::insert_into(memberships::table)
                .values(&NewMembershipRow {
                    id,
                    shop_id,
                    user_id,
                    email: email.to_string(),
                })
                .execute(conn);
            match inserted {
                Ok(_) => {}
                Err(diesel::result::Error::DatabaseError(
                    DatabaseErrorKind::UniqueViolation,
                    _,
                )) => return Err(DomainError::AlreadyExists("Membership")),
                Err(e) => return Err(e.into()),
            }

            let row: MembershipRow = memberships::table
                .filter(memberships::id.eq(id))
                .select(MembershipRow::as_select())
                .first(conn)?;
            Ok(membership_view(row))
        })
    }
}
