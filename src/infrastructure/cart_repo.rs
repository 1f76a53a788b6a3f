use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::cart::{CartLineUpdate, CartLineView, CartMerchandise, NewCartLine};
use crate::domain::catalog::{ShopSummary, VariantView};
use crate::domain::errors::DomainError;
use crate::domain::ports::CartRepository;
use crate::schema::{cart_orders, merchandises, shops, variants};

use super::models::{
    CartOrderChangeset, CartOrderRow, MerchandiseRow, NewCartOrderRow, ShopRow, VariantRow,
};
use super::{first_pictures, variants_by_merch};

pub struct DieselCartRepository {
    pool: DbPool,
}

impl DieselCartRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn load_lines(
    conn: &mut PgConnection,
    user_id: Uuid,
    line_id: Option<Uuid>,
) -> Result<Vec<CartLineView>, DomainError> {
    let mut query = cart_orders::table
        .inner_join(merchandises::table)
        .inner_join(shops::table)
        .filter(cart_orders::user_id.eq(user_id))
        .select((
            CartOrderRow::as_select(),
            MerchandiseRow::as_select(),
            ShopRow::as_select(),
        ))
        .into_boxed();
    if let Some(id) = line_id {
        query = query.filter(cart_orders::id.eq(id));
    }
    let rows: Vec<(CartOrderRow, MerchandiseRow, ShopRow)> = query
        .order((shops::acronym.asc(), cart_orders::created_at.asc()))
        .load(conn)?;

    // The same merchandise can appear on several lines, so lookups are by
    // reference rather than drained.
    let merch_ids: Vec<Uuid> = rows.iter().map(|(_, m, _)| m.id).collect();
    let pictures = first_pictures(conn, &merch_ids)?;
    let variant_map = variants_by_merch(conn, &merch_ids)?;

    Ok(rows
        .into_iter()
        .map(|(line, merch, shop)| {
            let variant_views: Vec<VariantView> = variant_map
                .get(&merch.id)
                .cloned()
                .unwrap_or_default()
                .into_iter()
                .map(VariantView::from)
                .collect();
            CartLineView {
                id: line.id,
                quantity: line.quantity,
                variant_id: line.variant_id,
                created_at: line.created_at,
                merchandise: CartMerchandise {
                    id: merch.id,
                    name: merch.name,
                    variant_name: merch.variant_name,
                    online_payment: merch.online_payment,
                    physical_payment: merch.physical_payment,
                    receiving_information: merch.receiving_information,
                    picture_url: pictures.get(&merch.id).cloned(),
                    variants: variant_views,
                },
                shop: ShopSummary::from(shop),
            }
        })
        .collect())
}

fn load_line(
    conn: &mut PgConnection,
    user_id: Uuid,
    line_id: Uuid,
) -> Result<CartLineView, DomainError> {
    load_lines(conn, user_id, Some(line_id))?
        .into_iter()
        .next()
        .ok_or(DomainError::NotFound("Cart line"))
}

/// Reject variants that belong to a different merchandise.
fn ensure_variant_of(
    conn: &mut PgConnection,
    variant_id: Uuid,
    merch_id: Uuid,
) -> Result<VariantRow, DomainError> {
    let variant: VariantRow = variants::table
        .filter(variants::id.eq(variant_id))
        .select(VariantRow::as_select())
        .first(conn)
        .optional()?
        .ok_or(DomainError::NotFound("Variant"))?;
    if variant.merch_id != merch_id {
        return Err(DomainError::InvalidInput(
            "Variant does not belong to the merchandise".to_string(),
        ));
    }
    Ok(variant)
}

impl CartRepository for DieselCartRepository {
    fn list_lines(&self, user_id: Uuid) -> Result<Vec<CartLineView>, DomainError> {
        let mut conn = self.pool.get()?;
        load_lines(&mut conn, user_id, None)
    }

    fn add_line(&self, line: NewCartLine) -> Result<CartLineView, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            ensure_variant_of(conn, line.variant_id, line.merch_id)?;
            let shop_id: Uuid = merchandises::table
                .filter(merchandises::id.eq(line.merch_id))
                .select(merchandises::shop_id)
                .first(conn)?;

            let id = Uuid::new_v4();
            diesel::insert_into(cart_orders::table)
                .values(&NewCartOrderRow {
                    id,
                    user_id: line.user_id,
                    merch_id: line.merch_id,
                    variant_id: line.variant_id,
                    shop_id,
                    quantity: line.quantity,
                })
                .execute(conn)?;

            load_line(conn, line.user_id, id)
        })
    }

    fn update_line(
        &self,
        user_id: Uuid,
        line_id: Uuid,
        changes: CartLineUpdate,
    ) -> Result<CartLineView, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            let line: CartOrderRow = cart_orders::table
                .filter(cart_orders::id.eq(line_id))
                .filter(cart_orders::user_id.eq(user_id))
                .for_update()
                .select(CartOrderRow::as_select())
                .first(conn)
                .optional()?
                .ok_or(DomainError::NotFound("Cart line"))?;

            if let Some(variant_id) = changes.variant_id {
                ensure_variant_of(conn, variant_id, line.merch_id)?;
            }

            diesel::update(cart_orders::table.filter(cart_orders::id.eq(line_id)))
                .set(&CartOrderChangeset {
                    quantity: changes.quantity,
                    variant_id: changes.variant_id,
                })
                .execute(conn)?;

            load_line(conn, user_id, line_id)
        })
    }

    fn remove_line(&self, user_id: Uuid, line_id: Uuid) -> Result<(), DomainError> {
        let mut conn = self.pool.get()?;

        let deleted = diesel::delete(
            cart_orders::table
                .filter(cart_orders::id.eq(line_id))
                .filter(cart_orders::user_id.eq(user_id)),
        )
        .execute(&mut conn)?;

        if deleted == 0 {
            return Err(DomainError::NotFound("Cart line"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::DieselCartRepository;
    use crate::domain::cart::{CartLineUpdate, NewCartLine};
    use crate::domain::errors::DomainError;
    use crate::domain::ports::CartRepository;
    use crate::infrastructure::test_support::{
        seed_merchandise, seed_profile, seed_shop, seed_variant, setup_db,
    };

    struct Fixture {
        user_id: Uuid,
        merch_id: Uuid,
        variant_id: Uuid,
        other_variant_id: Uuid,
    }

    async fn fixture(pool: &crate::db::DbPool) -> Fixture {
        let mut conn = pool.get().unwrap();
        let user_id = seed_profile(&mut conn, "buyer@cvsu.edu.ph");
        let shop_id = seed_shop(&mut conn, "ACES");
        let merch_id = seed_merchandise(&mut conn, shop_id, "Org Shirt", true, true);
        let variant_id = seed_variant(&mut conn, merch_id, "Small", "250.00", "220.00");
        let other_variant_id = seed_variant(&mut conn, merch_id, "Large", "270.00", "240.00");
        Fixture {
            user_id,
            merch_id,
            variant_id,
            other_variant_id,
        }
    }

    fn new_line(f: &Fixture, quantity: i32) -> NewCartLine {
        NewCartLine {
            user_id: f.user_id,
            merch_id: f.merch_id,
            variant_id: f.variant_id,
            quantity,
        }
    }

    #[tokio::test]
    async fn added_line_shows_up_with_merchandise_and_shop() {
        let (_container, pool) = setup_db().await;
        let f = fixture(&pool).await;
        let repo = DieselCartRepository::new(pool);

        let added = repo.add_line(new_line(&f, 2)).expect("add failed");
        assert_eq!(added.quantity, 2);
        assert_eq!(added.variant_id, f.variant_id);

        let lines = repo.list_lines(f.user_id).expect("list failed");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].merchandise.name, "Org Shirt");
        assert_eq!(lines[0].merchandise.variants.len(), 2);
        assert_eq!(lines[0].shop.acronym, "ACES");
    }

    #[tokio::test]
    async fn foreign_variant_is_rejected_on_add() {
        let (_container, pool) = setup_db().await;
        let f = fixture(&pool).await;
        let foreign_variant = {
            let mut conn = pool.get().unwrap();
            let other_shop = seed_shop(&mut conn, "ZSO");
            let other_merch = seed_merchandise(&mut conn, other_shop, "Mug", false, true);
            seed_variant(&mut conn, other_merch, "Standard", "150.00", "130.00")
        };
        let repo = DieselCartRepository::new(pool);

        let result = repo.add_line(NewCartLine {
            variant_id: foreign_variant,
            ..new_line(&f, 1)
        });

        assert!(matches!(result, Err(DomainError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn update_changes_quantity_and_variant() {
        let (_container, pool) = setup_db().await;
        let f = fixture(&pool).await;
        let repo = DieselCartRepository::new(pool);
        let line = repo.add_line(new_line(&f, 1)).expect("add failed");

        let updated = repo
            .update_line(
                f.user_id,
                line.id,
                CartLineUpdate {
                    quantity: Some(4),
                    variant_id: Some(f.other_variant_id),
                },
            )
            .expect("update failed");

        assert_eq!(updated.quantity, 4);
        assert_eq!(updated.variant_id, f.other_variant_id);
    }

    #[tokio::test]
    async fn update_leaves_unset_fields_alone() {
        let (_container, pool) = setup_db().await;
        let f = fixture(&pool).await;
        let repo = DieselCartRepository::new(pool);
        let line = repo.add_line(new_line(&f, 3)).expect("add failed");

        let updated = repo
            .update_line(
                f.user_id,
                line.id,
                CartLineUpdate {
                    quantity: None,
                    variant_id: Some(f.other_variant_id),
                },
            )
            .expect("update failed");

        assert_eq!(updated.quantity, 3);
        assert_eq!(updated.variant_id, f.other_variant_id);
    }

    #[tokio::test]
    async fn lines_are_scoped_to_their_owner() {
        let (_container, pool) = setup_db().await;
        let f = fixture(&pool).await;
        let other_user = {
            let mut conn = pool.get().unwrap();
            seed_profile(&mut conn, "other@cvsu.edu.ph")
        };
        let repo = DieselCartRepository::new(pool);
        let line = repo.add_line(new_line(&f, 1)).expect("add failed");

        assert!(repo.list_lines(other_user).expect("list failed").is_empty());
        assert!(matches!(
            repo.update_line(
                other_user,
                line.id,
                CartLineUpdate {
                    quantity: Some(2),
                    variant_id: None
                }
            ),
            Err(DomainError::NotFound("Cart line"))
        ));
        assert!(matches!(
            repo.remove_line(other_user, line.id),
            Err(DomainError::NotFound("Cart line"))
        ));
    }

    #[tokio::test]
    async fn removed_line_is_gone() {
        let (_container, pool) = setup_db().await;
        let f = fixture(&pool).await;
        let repo = DieselCartRepository::new(pool);
        let line = repo.add_line(new_line(&f, 1)).expect("add failed");

        repo.remove_line(f.user_id, line.id).expect("remove failed");

        assert!(repo.list_lines(f.user_id).expect("list failed").is_empty());
        assert!(matches!(
            repo.remove_line(f.user_id, line.id),
            Err(DomainError::NotFound("Cart line"))
        ));
    }
}
